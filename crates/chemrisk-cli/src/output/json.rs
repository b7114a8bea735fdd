use chemrisk_core::model::AssessmentResult;

pub fn print(result: &AssessmentResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
