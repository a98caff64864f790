//! `sustainly estimate`: Run the estimator over counts given on the command line.

use sustainly_estimator::{Class, SustainabilityEstimator};

/// Parse `NAME:POS:NEG`.
pub fn parse_attr(raw: &str) -> Result<(String, u64, u64), String> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(neg), Some(pos), Some(name)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected NAME:POS:NEG, got '{raw}'"));
    };
    if name.is_empty() {
        return Err(format!("attribute name missing in '{raw}'"));
    }
    let count = |s: &str| {
        s.trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid count '{s}' in '{raw}': {e}"))
    };
    Ok((name.to_string(), count(pos)?, count(neg)?))
}

pub fn run(attrs: &[String], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut estimator = SustainabilityEstimator::new();
    for raw in attrs {
        let (name, positive, negative) = parse_attr(raw)?;
        estimator.append_observation(name, positive, negative)?;
    }

    let likelihood = estimator.compute()?;
    let trace = estimator.compute_derivation_trace()?;

    if json {
        let out = serde_json::json!({
            "likelihood": likelihood,
            "derivation": trace,
            "frequencies": estimator.frequency_snapshot(),
            "smoothed": estimator.needs_smoothing(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("📊 Sustainability estimate");
    println!("==========================");
    println!("  Sustainable:    {:.2}%", likelihood.positive);
    println!("  Unsustainable:  {:.2}%", likelihood.negative);
    if estimator.needs_smoothing() {
        println!("  (additive smoothing applied)");
    }
    println!();
    println!("  Attribute | Sustainable | Unsustainable");
    for row in estimator.frequency_snapshot() {
        println!("  {} | {} | {}", row.name, row.positive, row.negative);
    }
    println!();
    for class in Class::BOTH {
        let label = match class {
            Class::Positive => "Sustainable",
            Class::Negative => "Unsustainable",
        };
        println!("  {label}: {}", trace.get(class));
    }
    Ok(())
}
