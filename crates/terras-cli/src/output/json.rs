use serde::Serialize;
use terras_core::error::TerrasError;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), TerrasError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
