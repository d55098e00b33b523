use crate::Chemistry::reference_tables::{ion_table, valence_table};
use crate::calculator_api::{ChemTask, TaskKind};
use crate::errors::ChemError;
use crate::settings::{ChemContext, Markup};
use log::warn;
use std::io::{self, BufRead, Write};

pub fn run_interactive_menu(ctx: &ChemContext) {
    // terminal has no bold tags
    let mut ctx = ctx.clone();
    ctx.settings.markup = Markup::Plain;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        show_main_menu();
        let Some(choice) = next_line(&mut lines) else {
            break;
        };
        match choice.trim() {
            "0" => {
                println!("До свидания!");
                break;
            }
            "11" => {
                valence_table(&ctx.table).printstd();
            }
            "12" => {
                ion_table(&ctx.table).printstd();
            }
            other => match menu_task(other) {
                Some(kind) => {
                    let mut inputs = Vec::new();
                    for prompt in kind.prompts() {
                        print!("\x1b[36m{}: \x1b[0m", prompt);
                        flush();
                        match next_line(&mut lines) {
                            Some(line) => inputs.push(line),
                            None => return,
                        }
                    }
                    println!("\n{}\n", run_task(&ctx, kind, &inputs));
                }
                None => println!("Неверный выбор, попробуйте еще раз."),
            },
        }
    }
}

/* colors
Blue (\x1b[34m) - header
Yellow (\x1b[33m) - menu items
Cyan (\x1b[36m) - prompts
Red (\x1b[31m) - error messages
*/
fn show_main_menu() {
    println!("\x1b[34m\n ChemSchool: школьный химический калькулятор \n\x1b[0m");
    for (i, kind) in TaskKind::ALL.iter().enumerate() {
        println!("\x1b[33m{}. {}\x1b[0m", i + 1, menu_title(*kind));
    }
    println!("\x1b[33m11. Таблица валентностей\x1b[0m");
    println!("\x1b[33m12. Таблица ионов и кислот\x1b[0m");
    println!("\x1b[33m0. Выход\x1b[0m");
    print!("\x1b[36mВыберите пункт: \x1b[0m");
    flush();
}

fn menu_task(choice: &str) -> Option<TaskKind> {
    let number: usize = choice.parse().ok()?;
    TaskKind::ALL.get(number.checked_sub(1)?).copied()
}

fn menu_title(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::MolecularWeight => "Молекулярная масса вещества",
        TaskKind::MassFraction => "Массовая доля элемента",
        TaskKind::VolumeFraction => "Объемная доля газа в смеси",
        TaskKind::AmountFromMass => "Количество вещества по массе",
        TaskKind::AmountFromParticles => "Количество вещества по числу частиц",
        TaskKind::AmountFromGasVolume => "Количество вещества по объему газа",
        TaskKind::GasDensity => "Плотность газа при н. у.",
        TaskKind::FormulateCompounds => "Составление формул по элементам",
        TaskKind::FormulasByName => "Формула по названию",
        TaskKind::BalanceEquation => "Уравнивание реакции",
    }
}

/// Answer text for the user, or the user message of the error in red
pub fn run_task(ctx: &ChemContext, kind: TaskKind, inputs: &[String]) -> String {
    match kind.with_inputs(inputs).and_then(|task| task.solve(ctx)) {
        Ok(answer) => answer.answer,
        Err(e) => error_text(&e),
    }
}

fn error_text(e: &ChemError) -> String {
    warn!("{}", e);
    format!("\x1b[31m{}\x1b[0m", e.user_message())
}

fn next_line<I: Iterator<Item = io::Result<String>>>(lines: &mut I) -> Option<String> {
    match lines.next()? {
        Ok(line) => Some(line),
        Err(e) => {
            warn!("failed to read input: {}", e);
            None
        }
    }
}

fn flush() {
    if let Err(e) = io::stdout().flush() {
        warn!("failed to flush stdout: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> ChemContext {
        let mut ctx = ChemContext::default();
        ctx.settings.markup = Markup::Plain;
        ctx
    }

    #[test]
    fn test_menu_numbers() {
        assert_eq!(menu_task("1"), Some(TaskKind::MolecularWeight));
        assert_eq!(menu_task("10"), Some(TaskKind::BalanceEquation));
        assert_eq!(menu_task("0"), None);
        assert_eq!(menu_task("13"), None);
        assert_eq!(menu_task("abc"), None);
    }

    #[test]
    fn test_run_task() {
        let answer = run_task(&plain(), TaskKind::MolecularWeight, &["H2O".to_string()]);
        assert_eq!(answer, "Mᵣ(H₂O) = 2Aᵣ(H) + Aᵣ(O) = 2 * 1 + 16 = 18");
        let answer = run_task(&plain(), TaskKind::BalanceEquation, &["C = O2".to_string()]);
        assert!(answer.contains("Ваша реакция не корректна или не существует!"));
        let answer = run_task(&plain(), TaskKind::GasDensity, &["Xx2O".to_string()]);
        assert!(answer.contains("Вы неправильно ввели данные для подсчета"));
    }
}
