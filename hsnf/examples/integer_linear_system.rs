//! Solve a system of linear equations over the integers and modulo a number.

use hsnf::{
    IntegerMatrix, IntegerVector, solve_integer_linear_system, solve_modular_integer_linear_system,
};
use num_bigint::BigInt;
use simplelog::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(LevelFilter::Info, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    let a = IntegerMatrix::from_rows(&[[6, 4, 10], [-1, 1, -5]]);
    let b = IntegerVector::from_entries([4, 11]);

    match solve_integer_linear_system(&a, &b)? {
        None => println!("No solution"),
        Some(s) => {
            println!("special solution\n{:?}", s.offset);
            println!("general solution basis\n{}", s.basis);
        }
    }

    let a = IntegerMatrix::from_rows(&[[4, -10], [7, 2]]);
    let b = IntegerVector::from_entries([8, 5]);
    match solve_modular_integer_linear_system(&a, &b, &BigInt::from(20))? {
        None => println!("No solution mod 20"),
        Some(s) => {
            println!("special solution mod 20\n{:?}", s.offset);
            println!("general solution basis\n{}", s.basis);
        }
    }

    Ok(())
}
