use chemrisk_core::model::AssessmentResult;

pub fn print(result: &AssessmentResult, verbose: bool) {
    println!("=== {} (CID {}) ===\n", result.compound_name, result.cid);
    println!("  Risk: {} ({}/100)", result.risk.tier, result.risk.score);
    for reason in &result.risk.reasons {
        println!("    - {reason}");
    }
    println!();

    if let Some(weight) = result.properties.molecular_weight {
        println!("  Molecular weight: {weight} Da");
    }
    if let Some(formula) = &result.properties.molecular_formula {
        println!("  Formula: {formula}");
    }
    if let Some(signal) = &result.ghs.signal_word {
        println!("  Signal word: {signal}");
    }
    if !result.ghs.hazard_statements.is_empty() {
        println!("  Hazard statements:");
        for statement in &result.ghs.hazard_statements {
            println!("    {statement}");
        }
    }

    if verbose {
        print_list("Precautionary codes", &result.ghs.precautionary_statements);
        print_list("LD50", &result.toxicity.ld50);
        print_list("LC50", &result.toxicity.lc50);
        print_list("Human effects", &result.toxicity.human_effects);
        print_list("Animal effects", &result.toxicity.animal_effects);
        print_list("Aquatic toxicity", &result.environmental.aquatic_toxicity);
        print_list("Biodegradability", &result.environmental.biodegradability);
        print_list("Bioaccumulation", &result.environmental.bioaccumulation);
        print_list("Synonyms", &result.synonyms);
        if let Some(description) = &result.description {
            println!("\n  Description: {description}");
        }
    }

    println!("\n  Record: {}", result.record_url);
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("  {label}:");
    for item in items {
        println!("    {item}");
    }
}
