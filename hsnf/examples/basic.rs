//! Normal forms of a small matrix, with the reductions logged at debug level.

use hsnf::rings::Z;
use hsnf::{
    IntegerMatrix, column_style_hermite_normal_form, row_style_hermite_normal_form,
    smith_normal_form,
};
use simplelog::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let m = IntegerMatrix::from_rows(&[
        [-6, 111, -36, 6],
        [5, -672, 210, 74],
        [0, -255, 81, 24],
    ]);

    // Smith normal form: diagonal 1, 3, 2079.
    let (d, l, r) = smith_normal_form(&m)?;
    assert_eq!(l.mul(&m, &Z).mul(&r, &Z), d);
    assert!(l.is_unimodular() && r.is_unimodular());
    println!("D =\n{d}");

    // Row-style Hermite normal form.
    let (h, l) = row_style_hermite_normal_form(&m)?;
    assert_eq!(l.mul(&m, &Z), h);
    assert!(l.is_unimodular());
    println!("H (row style) =\n{h}");

    // Column-style Hermite normal form.
    let (h, r) = column_style_hermite_normal_form(&m)?;
    assert_eq!(m.mul(&r, &Z), h);
    assert!(r.is_unimodular());
    println!("H (column style) =\n{h}");

    Ok(())
}
