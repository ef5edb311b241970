//! `predict` and `describe` commands.

use fuzzysat_core::AppConfig;
use fuzzysat_engine::satisfaction::{REVIEW_LENGTH, SATISFACTION, SENTIMENT};
use fuzzysat_engine::{ControlSystem, FuzzyVariable};

/// Evaluate one input pair and print the crisp score, its label, and the
/// rules that fired.
///
/// # Errors
///
/// Returns an error if the inputs are rejected or the output is undefined.
pub(crate) fn run_predict(
    system: &ControlSystem,
    config: &AppConfig,
    sentiment: f64,
    length: f64,
) -> anyhow::Result<()> {
    let mut sim = system.simulation();
    sim.input(SENTIMENT, sentiment)?.input(REVIEW_LENGTH, length)?;
    sim.compute()?;
    let score = sim.output(SATISFACTION)?;

    println!(
        "satisfaction = {score:.3} ({})",
        config.label_thresholds.label(Some(score))
    );
    if let Some(strengths) = sim.rule_strengths() {
        for (rule, strength) in system.rules().iter().zip(strengths) {
            if *strength > 0.0 {
                println!("  {strength:.3}  {rule}");
            }
        }
    }
    Ok(())
}

pub(crate) fn run_describe(system: &ControlSystem) {
    print!("{}", Description(system));
}

/// Plain-text listing of every variable, term and rule.
pub(crate) struct Description<'a>(pub(crate) &'a ControlSystem);

impl std::fmt::Display for Description<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let system = self.0;
        writeln!(f, "INPUTS")?;
        for variable in system.antecedents() {
            fmt_variable(f, variable)?;
        }
        writeln!(f, "OUTPUTS")?;
        for variable in system.consequents() {
            fmt_variable(f, variable)?;
        }
        writeln!(f, "RULES")?;
        for (idx, rule) in system.rules().iter().enumerate() {
            writeln!(f, "  {:>2}. {rule}", idx + 1)?;
        }
        writeln!(f, "DEFUZZIFICATION {}", system.settings().defuzzification)
    }
}

fn fmt_variable(f: &mut std::fmt::Formatter<'_>, variable: &FuzzyVariable) -> std::fmt::Result {
    let universe = variable.universe();
    writeln!(
        f,
        "  {} [{}, {}] ({} points)",
        variable.name(),
        universe.min(),
        universe.max(),
        universe.len()
    )?;
    for (label, triangle) in variable.terms() {
        writeln!(f, "    {label:<10}{triangle}")?;
    }
    Ok(())
}
