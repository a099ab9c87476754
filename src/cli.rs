//! Bucle interactivo de consulta en la terminal.
//!
//! Pregunta cuántos cursos buscar, luego cada código, muestra el resultado y
//! vuelve a empezar. Línea vacía, `q`/`quit`/`exit` o fin de entrada en la
//! pregunta inicial terminan la sesión.

use std::io::{self, BufRead, Write};

use crate::lookup::{format::render_outcome_text, lookup};
use crate::models::ScheduleTable;

pub const COUNT_PROMPT: &str = "How many courses to look up?";

/// Máximo de códigos por consulta
pub const MAX_CODES: usize = 50;

enum CountAnswer {
    Count(usize),
    Quit,
    Invalid(String),
}

fn parse_count(line: &str) -> CountAnswer {
    let t = line.trim();
    if t.is_empty() || matches!(t.to_lowercase().as_str(), "q" | "quit" | "exit") {
        return CountAnswer::Quit;
    }
    match t.parse::<usize>() {
        Ok(n) if (1..=MAX_CODES).contains(&n) => CountAnswer::Count(n),
        _ => CountAnswer::Invalid(t.to_string()),
    }
}

/// Lee una línea; `None` en fin de entrada.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}

/// Ejecuta la sesión completa. Devuelve cuántas consultas se respondieron.
pub fn run_session<R: BufRead, W: Write>(table: &ScheduleTable, input: &mut R, output: &mut W) -> io::Result<usize> {
    let mut answered = 0usize;
    loop {
        write!(output, "{} ", COUNT_PROMPT)?;
        output.flush()?;
        let Some(line) = read_line(input)? else { break };

        let n = match parse_count(&line) {
            CountAnswer::Count(n) => n,
            CountAnswer::Quit => break,
            CountAnswer::Invalid(v) => {
                writeln!(output, "'{}' is not a number between 1 and {}.", v, MAX_CODES)?;
                continue;
            }
        };

        let mut codes: Vec<String> = Vec::with_capacity(n);
        for i in 1..=n {
            write!(output, "Enter course code #{}: ", i)?;
            output.flush()?;
            match read_line(input)? {
                Some(code) => codes.push(code),
                None => break,
            }
        }

        let outcome = lookup(table, &codes);
        writeln!(output)?;
        write!(output, "{}", render_outcome_text(&outcome))?;
        writeln!(output)?;
        answered += 1;

        if codes.len() < n {
            // entrada terminada a mitad de la consulta
            break;
        }
    }
    Ok(answered)
}
