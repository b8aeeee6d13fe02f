/*!
## Terminal Module

Interactive front end for compiling and running programs. It plays the role
the machine core expects of its host: it supplies source text, shows the
diagnostics of the `CompileResult`, and drives the interpreter step by step.

*/

extern crate ansi_term;
extern crate ctrlc;
extern crate rustyline;

use crate::lang::Level;
use crate::mach::{compile, CompileResult, StepResult, TuringMachine};
use ansi_term::Style;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Steps executed between checks of the interrupt flag.
const RUN_SLICE: u64 = 5000;

pub fn main() {
    if std::env::args().count() > 2 {
        println!("Usage: turing [FILENAME]");
        return;
    }
    let mut args = std::env::args();
    let _executable = args.next();
    let filename = args.next().unwrap_or_default();
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    if let Err(error) = main_loop(interrupted, filename) {
        eprintln!("{}", error);
    }
}

struct Session {
    source: String,
    result: CompileResult,
    machine: TuringMachine,
}

impl Session {
    fn new(source: String) -> Session {
        let result = compile(&source);
        let mut machine = TuringMachine::new();
        if result.ok {
            machine.reset(&result.initial_tape, result.table.start_state);
        }
        Session {
            source,
            result,
            machine,
        }
    }

    fn report(&self) {
        for diagnostic in &self.result.diagnostics {
            let line = diagnostic.to_string();
            if diagnostic.level == Level::Error {
                println!("{}", Style::new().bold().paint(line));
            } else {
                println!("{}", line);
            }
        }
        if self.result.ok {
            println!(
                "compiled: {} transitions, start state {}, halt state {}",
                self.result.table.len(),
                self.result.table.start_state,
                self.result.table.halt_state
            );
        } else {
            println!("{}", Style::new().bold().paint("compilation failed"));
        }
    }

    fn reset(&mut self) {
        self.machine
            .reset(&self.result.initial_tape, self.result.table.start_state);
    }

    fn step(&mut self, count: u64) {
        if !self.result.ok {
            println!("nothing to run (compilation failed)");
            return;
        }
        let mut last = StepResult::Ok;
        for _ in 0..count {
            last = self.machine.step(&self.result.table);
            if last != StepResult::Ok {
                break;
            }
        }
        self.status();
        match last {
            StepResult::Ok => {}
            StepResult::Halted => println!("halted"),
            StepResult::NoTransition => {
                println!("{}", Style::new().bold().paint("no transition"))
            }
        }
    }

    fn run(&mut self, interrupted: &AtomicBool) {
        if !self.result.ok {
            println!("nothing to run (compilation failed)");
            return;
        }
        loop {
            for _ in 0..RUN_SLICE {
                match self.machine.step(&self.result.table) {
                    StepResult::Ok => {}
                    StepResult::Halted => {
                        println!("halted after {} steps", self.machine.steps());
                        self.tape();
                        return;
                    }
                    StepResult::NoTransition => {
                        println!(
                            "{}",
                            Style::new().bold().paint(format!(
                                "no transition for state {} and the current symbol (after {} steps)",
                                self.machine.state(),
                                self.machine.steps()
                            ))
                        );
                        return;
                    }
                }
            }
            if interrupted.swap(false, Ordering::SeqCst) {
                println!("interrupted after {} steps", self.machine.steps());
                return;
            }
        }
    }

    fn status(&self) {
        println!(
            "state {}  head {}  steps {}  halted {}",
            self.machine.state(),
            self.machine.head(),
            self.machine.steps(),
            self.machine.halted()
        );
    }

    fn tape(&self) {
        let head = self.machine.head();
        let (mut low, mut high) = self.machine.tape().bounds(head);
        low = low.max(head - 30);
        high = high.min(head + 30);
        let mut cells = String::new();
        for position in low..=high {
            let symbol = self.machine.tape().get(position);
            if position == head {
                cells.push_str(&format!("[{}]", symbol));
            } else {
                cells.push_str(&format!(" {} ", symbol));
            }
        }
        println!("{}..{}: {}", low, high, cells);
    }

    fn table(&self) {
        let states = self.result.table.states();
        let alphabet = if self.result.alphabet.is_empty() {
            self.result.table.alphabet()
        } else {
            self.result.alphabet.clone()
        };
        for state in states {
            for symbol in &alphabet {
                if let Some(transition) = self.result.table.get(state, symbol) {
                    println!(
                        "(q{}, '{}') -> (q{}, '{}', {})",
                        state, symbol, transition.next, transition.write, transition.motion
                    );
                }
            }
        }
    }
}

fn load(filename: &str) -> Option<Session> {
    match fs::read_to_string(filename) {
        Ok(source) => {
            let session = Session::new(source);
            session.report();
            Some(session)
        }
        Err(error) => {
            println!(
                "{}",
                Style::new()
                    .bold()
                    .paint(format!("cannot read {}: {}", filename, error))
            );
            None
        }
    }
}

fn main_loop(interrupted: Arc<AtomicBool>, filename: String) -> std::io::Result<()> {
    let mut editor = Editor::<()>::new();
    let mut session = if filename.is_empty() {
        Session::new(String::new())
    } else {
        match load(&filename) {
            Some(session) => session,
            None => return Ok(()),
        }
    };

    println!("type 'help' for commands");
    loop {
        interrupted.store(false, Ordering::SeqCst);
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(error) => {
                eprintln!("{}", error);
                break;
            }
        };
        editor.add_history_entry(line.as_str());
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let argument = words.next().unwrap_or("");
        match command {
            "" => {}
            "help" => help(),
            "load" => {
                if argument.is_empty() {
                    println!("usage: load FILENAME");
                } else if let Some(loaded) = load(argument) {
                    session = loaded;
                }
            }
            "compile" => {
                session = Session::new(session.source.clone());
                session.report();
            }
            "run" => session.run(&interrupted),
            "step" => {
                let count = argument.parse::<u64>().unwrap_or(1);
                session.step(count);
            }
            "reset" => {
                session.reset();
                session.status();
            }
            "tape" => session.tape(),
            "status" => session.status(),
            "table" => session.table(),
            "quit" | "exit" => break,
            other => println!("unknown command: '{}' (try 'help')", other),
        }
    }
    Ok(())
}

fn help() {
    println!("load FILE   read and compile a program");
    println!("compile     recompile the current program");
    println!("run         run until the machine halts (Ctrl-C interrupts)");
    println!("step [N]    execute N steps (default 1)");
    println!("reset       restore the initial tape and start state");
    println!("tape        show the tape around the head");
    println!("status      show state, head position and step count");
    println!("table       dump the transition table");
    println!("quit        leave");
}
