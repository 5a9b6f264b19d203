use crate::Result;
use crate::evaluation::CheckOutcome;
use core::fmt::Write;

pub fn generate<W: Write>(outcome: &CheckOutcome, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(outcome)?)?;
    Ok(())
}
