//! `nutassets classify`

use nut_assets::classify;

use crate::error::Result;

pub fn run_classify(path: &str) -> Result<()> {
    println!("{}", classify(path));
    Ok(())
}
