// This example shows how to parse an expression, differentiate it, and sample both over a range,
// which is everything a plotting front-end needs from graphcalc. Instead of drawing a chart, it
// prints the trees and a table of values.
//
// Usage:
//   cargo run --example graph_table --features examples -- [options] [expression]
//
// Options:
//   --derivative      also print the derivative's tree and values
//   --from <x>        start of the range (default -10)
//   --to <x>          end of the range (default 10)
//   --step <dx>       distance between sampled points (default 1 here, 0.01 in the library)
//
// If no expression is given, one is read per line from standard input. Set RUST_LOG=debug to see
// what the parser and differentiator are doing.

use std::error::Error;
use std::io::{stdin, BufRead};

use graphcalc::{graph::{self, Plot, SampleRange}, parse, Differentiator};

struct Options {
    with_derivative: bool,
    range: SampleRange,
    expression: Option<String>,
}

fn parse_options() -> Result<Options, Box<dyn Error>> {
    let mut options = Options {
        with_derivative: false,
        range: SampleRange { delta_x: 1.0, ..SampleRange::default() },
        expression: None,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut number = |name: &str| -> Result<f64, Box<dyn Error>> {
            let value = args.next().ok_or_else(|| format!("{} needs a value", name))?;
            Ok(value.parse()?)
        };

        match arg.as_str() {
            "--derivative" => options.with_derivative = true,
            "--from" => options.range.min_x = number("--from")?,
            "--to" => options.range.max_x = number("--to")?,
            "--step" => options.range.delta_x = number("--step")?,
            _ => options.expression = Some(arg),
        }
    }

    Ok(options)
}

fn show(text: &str, options: &Options) {
    // Parsing is the only operation which can fail. Everything after this point always produces
    // a result, even for strange input such as `x^x`, which has no differentiation rule
    let expression = match parse(text) {
        Ok(expression) => expression,
        Err(err) => {
            println!("{}", err);
            return;
        }
    };

    println!("Tree:\n{}", expression);

    if options.with_derivative {
        // Using a `Differentiator` directly, rather than `Expression::differentiate`, lets us find
        // out whether any part of the derivative is a placeholder `0`
        let mut differentiator = Differentiator::new();
        let derivative = differentiator.differentiate(expression.root());
        println!("Derivative:\n{}", derivative);
        for unrefined in differentiator.unrefined() {
            println!("Warning: no rule for {:?}, derivative may be incomplete", unrefined);
        }
    }

    let Plot { function, derivative } = graph::plot(&expression, &options.range, options.with_derivative);
    for (i, point) in function.points.iter().enumerate() {
        match &derivative {
            Some(derivative) => println!("{:>10.4} {:>16.6} {:>16.6}", point.x, point.y, derivative.points[i].y),
            None => println!("{:>10.4} {:>16.6}", point.x, point.y),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let options = parse_options()?;
    match &options.expression {
        Some(text) => show(text, &options),
        None => {
            for line in stdin().lock().lines() {
                let line = line?;
                if !line.trim().is_empty() {
                    show(&line, &options);
                }
            }
        }
    }

    Ok(())
}
