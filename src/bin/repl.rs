//! Reads one chain per line and rolls it.
//!
//! Usage: `repl [seed] [rolls]`. A line starting with `?` prints every step of
//! a single roll instead. Set `RUST_LOG=dice_chain=debug` to see individual dice.

use dice_chain::common::short_decimal;
use dice_chain::roll::SeedSource;
use dice_chain::{Chain, DiceResult, Roller, ValueProvider};
use std::io::{self, BufRead, Write};

fn roll(chain: &Chain, rolls: usize, roller: &mut dyn Roller) -> DiceResult<String> {
    let totals = chain
        .roll_many(rolls, roller)
        .map(|total| total.map(short_decimal))
        .collect::<DiceResult<Vec<_>>>()?;
    Ok(totals.join(", "))
}

fn roll_steps(chain: &Chain, roller: &mut dyn Roller) -> DiceResult<String> {
    let stepped = chain.roll_step_by_step(roller)?;
    let mut lines = vec![];
    for (i, step) in stepped.steps.iter().enumerate() {
        let rolls: Vec<_> = step.rolls().iter().copied().map(short_decimal).collect();
        let operation = if i == 0 {
            String::new()
        } else if step.operation().is_each() {
            format!("({} each) ", step.operation())
        } else {
            format!("{} ", step.operation())
        };
        lines.push(format!("  {}{} [{}]", operation, step, rolls.join(", ")));
    }
    lines.push(format!("= {}", short_decimal(stepped.total)));
    Ok(lines.join("\n"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().map(|s| s.parse::<u64>()).transpose()?;
    let rolls = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(1);
    let source = match seed {
        Some(seed) => SeedSource::from_seed(seed),
        None => SeedSource::from_entropy(),
    };
    let mut roller = source.spawn();
    log::info!("rolling {} time(s) per line, seed {:?}", rolls, seed);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        let line = line.trim();
        if !line.is_empty() {
            let (steps, text) = match line.strip_prefix('?') {
                Some(text) => (true, text),
                None => (false, line),
            };
            let result = dice_chain::parse(text).and_then(|chain| {
                let bounds = format!(
                    "{} [{}, {}]",
                    chain,
                    short_decimal(chain.minimum()),
                    short_decimal(chain.maximum())
                );
                let rolled = if steps {
                    roll_steps(&chain, &mut roller)?
                } else {
                    roll(&chain, rolls, &mut roller)?
                };
                Ok(format!("{}\n{}", bounds, rolled))
            });
            match result {
                Ok(r) => println!("{}", r),
                Err(why) => eprintln!("Error: {}", why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
