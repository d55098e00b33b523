//! # Calculator API
//!
//! Every problem the calculator solves is a typed task struct implementing [`ChemTask`];
//! [`CalculatorTask`] joins them into one enum with static dispatch. Front ends (the terminal
//! menu, a chat bot) build a task from user input and call `solve`.
//!
//! ```text
//! TaskKind --(inputs from user)--> CalculatorTask --solve(ctx)--> TaskAnswer
//! ```
//!
//! ru
//! Единый интерфейс всех задач калькулятора.
use crate::Chemistry::equation::{ReactionType, balance_equation};
use crate::Chemistry::nomenclature::{formulation_of_chemical_formulas, making_formulas_by_name};
use crate::calculations;
use crate::errors::{ChemError, ChemResult};
use crate::settings::ChemContext;
use enum_dispatch::enum_dispatch;
use log::info;
use std::fmt;

/// numeric, categorical or list result of a task
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Number(f64),
    Category(ReactionType),
    Compounds(Vec<String>),
}

/// formatted answer text together with its outcome
#[derive(Debug, Clone, PartialEq)]
pub struct TaskAnswer {
    pub answer: String,
    pub outcome: Outcome,
}

impl fmt::Display for TaskAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.answer)
    }
}

#[enum_dispatch]
pub trait ChemTask {
    fn solve(&self, ctx: &ChemContext) -> ChemResult<TaskAnswer>;
    fn title(&self) -> &'static str;
}

/// Mᵣ of a formula
#[derive(Debug, Clone, PartialEq)]
pub struct MolecularWeightTask {
    pub formula: String,
}

impl ChemTask for MolecularWeightTask {
    fn solve(&self, ctx: &ChemContext) -> ChemResult<TaskAnswer> {
        calculations::molecular_weight_task(ctx, &self.formula)
    }
    fn title(&self) -> &'static str {
        "Молекулярная масса"
    }
}

/// ω of an element in a formula, percent
#[derive(Debug, Clone, PartialEq)]
pub struct MassFractionTask {
    pub formula: String,
    pub element: String,
}

impl ChemTask for MassFractionTask {
    fn solve(&self, ctx: &ChemContext) -> ChemResult<TaskAnswer> {
        calculations::mass_fraction(ctx, &self.formula, self.element.trim())
    }
    fn title(&self) -> &'static str {
        "Массовая доля элемента"
    }
}

/// φ of a gas in a mixture
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeFractionTask {
    pub part: String,
    pub mixture: String,
}

impl ChemTask for VolumeFractionTask {
    fn solve(&self, ctx: &ChemContext) -> ChemResult<TaskAnswer> {
        calculations::volume_fraction(ctx, &self.part, &self.mixture)
    }
    fn title(&self) -> &'static str {
        "Объемная доля"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmountFromMassTask {
    pub weight: String,
    pub formula: String,
}

impl ChemTask for AmountFromMassTask {
    fn solve(&self, ctx: &ChemContext) -> ChemResult<TaskAnswer> {
        calculations::amount_of_substance_from_mass(ctx, &self.weight, &self.formula)
    }
    fn title(&self) -> &'static str {
        "Количество вещества по массе"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmountFromParticlesTask {
    pub particles: String,
}

impl ChemTask for AmountFromParticlesTask {
    fn solve(&self, ctx: &ChemContext) -> ChemResult<TaskAnswer> {
        calculations::amount_of_substance_from_number_of_particles(ctx, &self.particles)
    }
    fn title(&self) -> &'static str {
        "Количество вещества по числу частиц"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmountFromGasVolumeTask {
    pub volume: String,
}

impl ChemTask for AmountFromGasVolumeTask {
    fn solve(&self, ctx: &ChemContext) -> ChemResult<TaskAnswer> {
        calculations::amount_of_substance_from_volume_of_gas(ctx, &self.volume)
    }
    fn title(&self) -> &'static str {
        "Количество вещества по объему газа"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GasDensityTask {
    pub formula: String,
}

impl ChemTask for GasDensityTask {
    fn solve(&self, ctx: &ChemContext) -> ChemResult<TaskAnswer> {
        calculations::gas_density(ctx, &self.formula)
    }
    fn title(&self) -> &'static str {
        "Плотность газа (н. у.)"
    }
}

/// all compounds of the given letters: "FeO" -> FeO, Fe₂O₃
#[derive(Debug, Clone, PartialEq)]
pub struct FormulateCompoundsTask {
    pub letters: String,
}

impl ChemTask for FormulateCompoundsTask {
    fn solve(&self, ctx: &ChemContext) -> ChemResult<TaskAnswer> {
        let answer = formulation_of_chemical_formulas(&ctx.table, &self.letters)?;
        Ok(TaskAnswer {
            answer: answer.text,
            outcome: Outcome::Compounds(answer.formulas),
        })
    }
    fn title(&self) -> &'static str {
        "Составление формул"
    }
}

/// compounds for a Russian name; the outcome lists the highlighted ones
#[derive(Debug, Clone, PartialEq)]
pub struct FormulasByNameTask {
    pub name: String,
}

impl ChemTask for FormulasByNameTask {
    fn solve(&self, ctx: &ChemContext) -> ChemResult<TaskAnswer> {
        let answer = making_formulas_by_name(&ctx.table, &self.name, ctx.settings.markup)?;
        let compounds = if answer.highlighted.is_empty() {
            answer.formulas
        } else {
            answer.highlighted
        };
        Ok(TaskAnswer {
            answer: answer.text,
            outcome: Outcome::Compounds(compounds),
        })
    }
    fn title(&self) -> &'static str {
        "Формула по названию"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceEquationTask {
    pub equation: String,
}

impl ChemTask for BalanceEquationTask {
    fn solve(&self, ctx: &ChemContext) -> ChemResult<TaskAnswer> {
        let equation = balance_equation(&ctx.table, &self.equation)?;
        Ok(TaskAnswer {
            answer: equation.render(ctx.settings.markup)?,
            outcome: Outcome::Category(equation.reaction_type),
        })
    }
    fn title(&self) -> &'static str {
        "Уравнение реакции"
    }
}

#[enum_dispatch(ChemTask)]
#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorTask {
    MolecularWeightTask,
    MassFractionTask,
    VolumeFractionTask,
    AmountFromMassTask,
    AmountFromParticlesTask,
    AmountFromGasVolumeTask,
    GasDensityTask,
    FormulateCompoundsTask,
    FormulasByNameTask,
    BalanceEquationTask,
}

/// Kind of task without its input; what a menu item selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    MolecularWeight,
    MassFraction,
    VolumeFraction,
    AmountFromMass,
    AmountFromParticles,
    AmountFromGasVolume,
    GasDensity,
    FormulateCompounds,
    FormulasByName,
    BalanceEquation,
}

impl TaskKind {
    pub const ALL: [TaskKind; 10] = [
        TaskKind::MolecularWeight,
        TaskKind::MassFraction,
        TaskKind::VolumeFraction,
        TaskKind::AmountFromMass,
        TaskKind::AmountFromParticles,
        TaskKind::AmountFromGasVolume,
        TaskKind::GasDensity,
        TaskKind::FormulateCompounds,
        TaskKind::FormulasByName,
        TaskKind::BalanceEquation,
    ];

    /// what the user is asked for, one prompt per input
    pub fn prompts(&self) -> &'static [&'static str] {
        match self {
            TaskKind::MolecularWeight => &["Введите формулу вещества (H2SO4)"],
            TaskKind::MassFraction => &[
                "Введите формулу вещества (SO2)",
                "Введите символ элемента (S)",
            ],
            TaskKind::VolumeFraction => &[
                "Введите объем газа (3 л)",
                "Введите объем смеси (15 л)",
            ],
            TaskKind::AmountFromMass => &[
                "Введите массу вещества (36 г)",
                "Введите формулу вещества (H2O)",
            ],
            TaskKind::AmountFromParticles => &["Введите число частиц (6.02 * 10**23)"],
            TaskKind::AmountFromGasVolume => &["Введите объем газа (44,8 л)"],
            TaskKind::GasDensity => &["Введите формулу газа (O2)"],
            TaskKind::FormulateCompounds => &["Введите элементы вещества (FeO, CaSO4)"],
            TaskKind::FormulasByName => &["Введите название вещества (оксид железа)"],
            TaskKind::BalanceEquation => &["Введите схему реакции (H2 + O2 = H2O)"],
        }
    }

    /// builds the task from the answers to `prompts`, in the same order
    pub fn with_inputs(&self, inputs: &[String]) -> ChemResult<CalculatorTask> {
        let expected = self.prompts().len();
        if inputs.len() != expected {
            return Err(ChemError::input_format(
                &inputs.join("; "),
                &format!("expected {} inputs, got {}", expected, inputs.len()),
            ));
        }
        let arg = |i: usize| inputs[i].trim().to_string();
        let task: CalculatorTask = match self {
            TaskKind::MolecularWeight => MolecularWeightTask { formula: arg(0) }.into(),
            TaskKind::MassFraction => MassFractionTask {
                formula: arg(0),
                element: arg(1),
            }
            .into(),
            TaskKind::VolumeFraction => VolumeFractionTask {
                part: arg(0),
                mixture: arg(1),
            }
            .into(),
            TaskKind::AmountFromMass => AmountFromMassTask {
                weight: arg(0),
                formula: arg(1),
            }
            .into(),
            TaskKind::AmountFromParticles => AmountFromParticlesTask { particles: arg(0) }.into(),
            TaskKind::AmountFromGasVolume => AmountFromGasVolumeTask { volume: arg(0) }.into(),
            TaskKind::GasDensity => GasDensityTask { formula: arg(0) }.into(),
            TaskKind::FormulateCompounds => FormulateCompoundsTask { letters: arg(0) }.into(),
            TaskKind::FormulasByName => FormulasByNameTask { name: arg(0) }.into(),
            TaskKind::BalanceEquation => BalanceEquationTask { equation: arg(0) }.into(),
        };
        info!("task '{}' created from {:?}", task.title(), inputs);
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Markup, Settings};
    use approx::assert_relative_eq;

    fn inputs(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dispatch_numbers() {
        let ctx = ChemContext::default();
        let cases: Vec<(CalculatorTask, f64)> = vec![
            (
                MolecularWeightTask {
                    formula: "Fe2(SO4)3".to_string(),
                }
                .into(),
                400.0,
            ),
            (
                MassFractionTask {
                    formula: "SO2".to_string(),
                    element: "S".to_string(),
                }
                .into(),
                50.0,
            ),
            (
                AmountFromParticlesTask {
                    particles: "6.02 * 10**23".to_string(),
                }
                .into(),
                1.0,
            ),
            (
                AmountFromGasVolumeTask {
                    volume: "44.8 л".to_string(),
                }
                .into(),
                2.0,
            ),
        ];
        for (task, expected) in cases {
            match task.solve(&ctx).unwrap().outcome {
                Outcome::Number(value) => assert_relative_eq!(value, expected),
                other => panic!("{}: unexpected outcome {:?}", task.title(), other),
            }
        }
    }

    #[test]
    fn test_equation_task() {
        let ctx = ChemContext::new(Settings {
            markup: Markup::Plain,
            ..Settings::default()
        });
        let task = TaskKind::BalanceEquation
            .with_inputs(&inputs(&["Zn + HCl = ZnCl2 + H2"]))
            .unwrap();
        let answer = task.solve(&ctx).unwrap();
        assert_eq!(answer.outcome, Outcome::Category(ReactionType::Substitution));
        assert!(answer.answer.starts_with("Zn + 2HCl = ZnCl₂ + H₂"));
        assert!(answer.answer.ends_with("Сумма коэффициентов реакции: 5"));
    }

    #[test]
    fn test_compound_tasks() {
        let ctx = ChemContext::default();
        let task = TaskKind::FormulateCompounds
            .with_inputs(&inputs(&["FeO"]))
            .unwrap();
        assert_eq!(
            task.solve(&ctx).unwrap().outcome,
            Outcome::Compounds(vec!["FeO".to_string(), "Fe₂O₃".to_string()])
        );
        let task = TaskKind::FormulasByName
            .with_inputs(&inputs(&["оксид железа (iii)"]))
            .unwrap();
        assert_eq!(
            task.solve(&ctx).unwrap().outcome,
            Outcome::Compounds(vec!["Fe₂O₃".to_string()])
        );
    }

    #[test]
    fn test_with_inputs() {
        let task = TaskKind::MassFraction
            .with_inputs(&inputs(&[" H2O ", "H"]))
            .unwrap();
        assert_eq!(
            task,
            CalculatorTask::MassFractionTask(MassFractionTask {
                formula: "H2O".to_string(),
                element: "H".to_string(),
            })
        );
        assert!(matches!(
            TaskKind::MassFraction.with_inputs(&inputs(&["H2O"])),
            Err(ChemError::InputFormat { .. })
        ));
        for kind in TaskKind::ALL {
            assert!(!kind.prompts().is_empty());
        }
    }

    #[test]
    fn test_errors_pass_through() {
        let ctx = ChemContext::default();
        let task: CalculatorTask = BalanceEquationTask {
            equation: "C = O2".to_string(),
        }
        .into();
        assert!(matches!(
            task.solve(&ctx),
            Err(ChemError::BalancingFailure { .. })
        ));
        let task: CalculatorTask = GasDensityTask {
            formula: "Xx2O".to_string(),
        }
        .into();
        assert!(matches!(task.solve(&ctx), Err(ChemError::UnknownSymbol { .. })));
    }
}
