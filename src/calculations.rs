//! # Calculations Module
//!
//! School problems on formulas and quantities. Every function returns the solution written
//! step by step (the way it is written in a notebook) and the numeric result, rounded half-up
//! to 5 decimals.
//!
//! | problem | formula |
//! |---------|---------|
//! | molecular weight | Mᵣ = Σ n·Aᵣ |
//! | mass fraction of an element | ω = Aᵣ·n / Mᵣ · 100% |
//! | gas density at normal conditions | ρ = M / Vm |
//! | amount of substance from mass | n = m / M |
//! | amount of substance from number of particles | n = N / Nₐ |
//! | amount of substance from gas volume | n = V / Vm |
//! | volume fraction | φ = V(part) / V(mixture) |
//!
//! ru
//! Расчетные задачи: молекулярная масса, массовая и объемная доли, плотность газа,
//! количество вещества.
use crate::Chemistry::molmass::{MolecularWeight, molecular_weight, parse_formula};
use crate::Quantities::expression::evaluate;
use crate::Quantities::units::{Volume, Weight};
use crate::Utils::numbers::{format_number, round_half_up};
use crate::Utils::subscripts::to_superscript;
use crate::calculator_api::{Outcome, TaskAnswer};
use crate::errors::{ChemError, ChemResult};
use crate::settings::ChemContext;
use log::debug;

const DIGITS: u32 = 5;

fn round(value: f64) -> f64 {
    round_half_up(value, DIGITS)
}

fn weight_of(ctx: &ChemContext, formula: &str) -> ChemResult<MolecularWeight> {
    let parsed = parse_formula(&ctx.table, formula)?;
    molecular_weight(&ctx.table, formula, &parsed)
}

/// 6.02e23 -> "6.02 * 10²³"
fn scientific(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let exponent = value.abs().log10().floor() as i32;
    let mantissa = round(value / 10f64.powi(exponent));
    format!(
        "{} * 10{}",
        format_number(mantissa),
        to_superscript(&exponent.to_string())
    )
}

/// Mᵣ(H₂O) = 2Aᵣ(H) + Aᵣ(O) = 2 * 1 + 16 = 18
pub fn molecular_weight_task(ctx: &ChemContext, formula: &str) -> ChemResult<TaskAnswer> {
    let weight = weight_of(ctx, formula)?;
    Ok(TaskAnswer {
        answer: weight.render(ctx.settings.markup),
        outcome: Outcome::Number(weight.value),
    })
}

/// Mass fraction of an element in percent: S in SO₂ is 50
pub fn mass_fraction(ctx: &ChemContext, formula: &str, element: &str) -> ChemResult<TaskAnswer> {
    let parsed = parse_formula(&ctx.table, formula)?;
    let count = parsed.count(element);
    if count == 0 {
        return Err(ChemError::input_format(
            element,
            &format!("element is not part of {}", formula),
        ));
    }
    let weight = molecular_weight(&ctx.table, formula, &parsed)?;
    let atomic_weight = ctx.table.atomic_weight(element)?;
    let percent = round(atomic_weight * count as f64 / weight.value * 100.0);
    let answer = format!(
        "1. {}\n2. ω({e}) = Aᵣ({e}) * n({e}) / Mᵣ({f}) * 100% = {} * {} / {} * 100% = {}",
        weight.render(ctx.settings.markup),
        format_number(atomic_weight),
        count,
        format_number(weight.value),
        ctx.settings.markup.bold(&format!("{}%", format_number(percent))),
        e = element,
        f = weight.formula,
    );
    Ok(TaskAnswer {
        answer,
        outcome: Outcome::Number(percent),
    })
}

/// Density of a gas at normal conditions, г/л
pub fn gas_density(ctx: &ChemContext, formula: &str) -> ChemResult<TaskAnswer> {
    let weight = weight_of(ctx, formula)?;
    let molar_volume = ctx.settings.molar_volume;
    let density = round(weight.value / molar_volume);
    let answer = format!(
        "{}\nρ({f}) = M({f}) / Vm = {} г/моль / {} л/моль = {}",
        weight.render(ctx.settings.markup),
        format_number(weight.value),
        format_number(molar_volume),
        ctx.settings
            .markup
            .bold(&format!("{} г/л", format_number(density))),
        f = weight.formula,
    );
    Ok(TaskAnswer {
        answer,
        outcome: Outcome::Number(density),
    })
}

/// n = V / Vm for a gas at normal conditions
pub fn amount_of_substance_from_volume_of_gas(
    ctx: &ChemContext,
    volume: &str,
) -> ChemResult<TaskAnswer> {
    let volume = Volume::parse(volume)?;
    let molar_volume = ctx.settings.molar_volume;
    let amount = round(volume.get_value("л")? / molar_volume);
    let answer = format!(
        "n = V / Vm\nn = {} / {} л/моль = {}",
        volume,
        format_number(molar_volume),
        ctx.settings
            .markup
            .bold(&format!("{} моль", format_number(amount)))
    );
    Ok(TaskAnswer {
        answer,
        outcome: Outcome::Number(amount),
    })
}

/// n = N / Nₐ, N given as an expression ("6.02 * 10**23")
pub fn amount_of_substance_from_number_of_particles(
    ctx: &ChemContext,
    particles: &str,
) -> ChemResult<TaskAnswer> {
    let count = evaluate(particles)?;
    let avogadro = ctx.settings.avogadro;
    let amount = round(count / avogadro);
    debug!("N = {} -> n = {}", count, amount);
    let answer = format!(
        "n = N / Nₐ = {} / {} моль⁻¹ = {}",
        particles.trim(),
        scientific(avogadro),
        ctx.settings
            .markup
            .bold(&format!("{} моль", format_number(amount)))
    );
    Ok(TaskAnswer {
        answer,
        outcome: Outcome::Number(amount),
    })
}

/// n = m / M
pub fn amount_of_substance_from_mass(
    ctx: &ChemContext,
    weight: &str,
    formula: &str,
) -> ChemResult<TaskAnswer> {
    let weight = Weight::parse(weight)?;
    let molar = weight_of(ctx, formula)?;
    let amount = round(weight.get_value("г")? / molar.value);
    let answer = format!(
        "1. M({f}) = Mᵣ({f}) г/моль = {m} г/моль\n2. n({f}) = m / M = {} / {m} г/моль = {}",
        weight,
        ctx.settings
            .markup
            .bold(&format!("{} моль", format_number(amount))),
        f = molar.formula,
        m = format_number(molar.value),
    );
    Ok(TaskAnswer {
        answer,
        outcome: Outcome::Number(amount),
    })
}

/// φ = V(part) / V(mixture); the result is a fraction of one, the answer also shows percent
pub fn volume_fraction(ctx: &ChemContext, part: &str, mixture: &str) -> ChemResult<TaskAnswer> {
    let part = Volume::parse(part)?;
    let mixture = Volume::parse(mixture)?;
    let fraction = round(part.ratio_to(&mixture)?);
    let answer = format!(
        "φ = {} / {} = {} = {}",
        part,
        mixture,
        format_number(fraction),
        ctx.settings
            .markup
            .bold(&format!("{}%", format_number(round(fraction * 100.0))))
    );
    Ok(TaskAnswer {
        answer,
        outcome: Outcome::Number(fraction),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Markup, Settings};
    use approx::assert_relative_eq;

    fn ctx() -> ChemContext {
        ChemContext::default()
    }

    fn number(answer: &TaskAnswer) -> f64 {
        match answer.outcome {
            Outcome::Number(value) => value,
            ref other => panic!("expected a number, got {:?}", other),
        }
    }

    #[test]
    fn test_molecular_weight() {
        let answer = molecular_weight_task(&ctx(), "H2O").unwrap();
        assert_relative_eq!(number(&answer), 18.0);
        assert_eq!(answer.answer, "Mᵣ(H₂O) = 2Aᵣ(H) + Aᵣ(O) = 2 * 1 + 16 = <b>18</b>");
        let answer = molecular_weight_task(&ctx(), "Fe2(SO4)3").unwrap();
        assert_relative_eq!(number(&answer), 400.0);
    }

    #[test]
    fn test_mass_fraction() {
        let answer = mass_fraction(&ctx(), "SO2", "S").unwrap();
        assert_relative_eq!(number(&answer), 50.0);
        assert!(answer.answer.ends_with(
            "2. ω(S) = Aᵣ(S) * n(S) / Mᵣ(SO₂) * 100% = 32 * 1 / 64 * 100% = <b>50%</b>"
        ));
        let answer = mass_fraction(&ctx(), "H2O", "H").unwrap();
        assert_relative_eq!(number(&answer), 11.11111);
        assert!(matches!(
            mass_fraction(&ctx(), "H2O", "Na"),
            Err(ChemError::InputFormat { .. })
        ));
    }

    #[test]
    fn test_gas_density() {
        let answer = gas_density(&ctx(), "O2").unwrap();
        assert_relative_eq!(number(&answer), 1.42857);
        assert!(
            answer
                .answer
                .ends_with("ρ(O₂) = M(O₂) / Vm = 32 г/моль / 22.4 л/моль = <b>1.42857 г/л</b>")
        );
    }

    #[test]
    fn test_amount_of_substance() {
        let answer = amount_of_substance_from_volume_of_gas(&ctx(), "44,8 л").unwrap();
        assert_relative_eq!(number(&answer), 2.0);
        assert_eq!(answer.answer, "n = V / Vm\nn = 44.8л / 22.4 л/моль = <b>2 моль</b>");

        let answer = amount_of_substance_from_number_of_particles(&ctx(), "6.02 * 10**23").unwrap();
        assert_relative_eq!(number(&answer), 1.0);
        assert_eq!(
            answer.answer,
            "n = N / Nₐ = 6.02 * 10**23 / 6.02 * 10²³ моль⁻¹ = <b>1 моль</b>"
        );

        let answer = amount_of_substance_from_mass(&ctx(), "36 г", "H2O").unwrap();
        assert_relative_eq!(number(&answer), 2.0);
        assert_eq!(
            answer.answer,
            "1. M(H₂O) = Mᵣ(H₂O) г/моль = 18 г/моль\n2. n(H₂O) = m / M = 36г / 18 г/моль = <b>2 моль</b>"
        );
        let answer = amount_of_substance_from_mass(&ctx(), "0,2 кг", "NaOH").unwrap();
        assert_relative_eq!(number(&answer), 5.0);
        assert!(matches!(
            amount_of_substance_from_mass(&ctx(), "-36 г", "H2O"),
            Err(ChemError::InputFormat { .. })
        ));
        assert!(matches!(
            amount_of_substance_from_volume_of_gas(&ctx(), "-44,8 л"),
            Err(ChemError::InputFormat { .. })
        ));
    }

    #[test]
    fn test_volume_fraction() {
        let plain = ChemContext::new(Settings {
            markup: Markup::Plain,
            ..Settings::default()
        });
        let answer = volume_fraction(&plain, "300 мл", "1,5 л").unwrap();
        assert_relative_eq!(number(&answer), 0.2);
        assert_eq!(answer.answer, "φ = 300мл / 1.5л = 0.2 = 20%");
        assert!(volume_fraction(&plain, "1 л", "0 л").is_err());
    }

    #[test]
    fn test_settings_change_constants() {
        let ctx = ChemContext::new(Settings {
            molar_volume: 22.414,
            ..Settings::default()
        });
        let answer = amount_of_substance_from_volume_of_gas(&ctx, "22.414 л").unwrap();
        assert_relative_eq!(number(&answer), 1.0);
    }

    #[test]
    fn test_scientific() {
        assert_eq!(scientific(6.02e23), "6.02 * 10²³");
        assert_eq!(scientific(1.5e-3), "1.5 * 10⁻³");
    }
}
