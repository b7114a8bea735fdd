use chemrisk_core::identifier::Identifier;

pub fn run(query: &str) -> anyhow::Result<()> {
    let identifier = Identifier::classify(query);
    println!("{}: {}", identifier.raw, identifier.kind);
    Ok(())
}
