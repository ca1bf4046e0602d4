use dice_dist::stringify::{stringify, SpacedStringifier};
use dice_dist::{evaluate, parse, summarize, Config, Summary, Weighting};
use std::io::{self, BufRead, Write};

const BAR_WIDTH: usize = 50;

const HELP: &str = "\
Enter a dice expression such as `2d6 + 1d4` or `(2d6 + 1d4) * 2`.
Commands:
  :mode exact|mc    choose exact enumeration or Monte Carlo sampling
  :sims N           number of Monte Carlo samples (100 to 1000000)
  :cap N|none       largest outcome count exact mode will enumerate
  :show             print the current settings
  :help             print this message";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let mut config = Config::from_env()?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        let line = line.trim();
        if let Some(command) = line.strip_prefix(':') {
            match run_command(command, config) {
                Ok(new_config) => config = new_config,
                Err(why) => eprintln!("Error: {}", why),
            }
        } else if !line.is_empty() {
            match compute(line, &config) {
                Ok((expr, summary)) => print_summary(&expr, &summary),
                Err(why) => eprintln!("Error: {}", why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

fn run_command(command: &str, config: Config) -> Result<Config, Box<dyn std::error::Error>> {
    let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
    let arg = arg.trim();
    let config = match name {
        "mode" => config.with_mode(arg.parse()?),
        "sims" => config.with_simulation_count(arg.replace('_', "").parse()?)?,
        "cap" if arg.eq_ignore_ascii_case("none") => config.with_max_exact_outcomes(None)?,
        "cap" => config.with_max_exact_outcomes(Some(arg.replace('_', "").parse()?))?,
        "show" => {
            let cap = config
                .max_exact_outcomes()
                .map_or_else(|| "none".to_string(), |x| x.to_string());
            println!(
                "mode: {}, simulations: {}, exact cap: {}",
                config.mode(),
                config.simulation_count(),
                cap
            );
            config
        }
        "help" => {
            println!("{}", HELP);
            config
        }
        _ => return Err(format!("unknown command ':{}'; try ':help'", name).into()),
    };
    Ok(config)
}

fn compute(line: &str, config: &Config) -> dice_dist::Result<(String, Summary)> {
    let expr = parse(line)?;
    let outcomes = evaluate(&expr, config, rand::thread_rng())?;
    let summary = summarize(&outcomes, config.mode().weighting());
    Ok((stringify(&mut SpacedStringifier, &expr), summary))
}

fn print_summary(expr: &str, summary: &Summary) {
    println!(
        "{}: {} outcomes, min {}, max {}, mean {:.3}, std dev {:.3}",
        expr, summary.total, summary.min, summary.max, summary.mean, summary.std_dev
    );
    if summary.non_finite > 0 {
        println!("  {} outcomes divided by zero and are not shown", summary.non_finite);
    }

    let max_weight = summary.max_weight();
    if max_weight <= 0.0 {
        return;
    }
    let label_width = summary
        .bins
        .iter()
        .map(|bin| bin.value.to_string().len())
        .max()
        .unwrap_or(1);
    println!("{:>width$} | {}", "", summary.weighting.label(), width = label_width);
    for bin in &summary.bins {
        let len = (bin.weight / max_weight * BAR_WIDTH as f64).round() as usize;
        println!(
            "{:>width$} | {:<bar$} {}",
            bin.value,
            "#".repeat(len),
            format_weight(summary, bin.weight),
            width = label_width,
            bar = BAR_WIDTH
        );
    }
}

fn format_weight(summary: &Summary, weight: f64) -> String {
    match summary.weighting {
        Weighting::Sampled => format!("{}", weight),
        Weighting::EqualWeight => format!("{:.4}%", weight * 100.0),
    }
}
