mod command;

use clap::Parser;
use command::Command;
use helios::{registers, PortController};
use portio::{IoSpace, SimulatedIoSpace};
use std::error::Error;
use std::process;

/// Drives the digital I/O ports of the Helios PC/104 board.
///
/// The board is initialized first, which turns all ports into outputs. Then,
/// the given operations are performed in order. Each operation has a form of
/// `<verb>:<port>[:<value>]`, where port is one of a, b, c (data ports), ch,
/// cl (high and low half of port C, for `dir` only), and value is a byte in
/// decimal, 0x hexadecimal or 0b binary notation:
///
///   dir:<port>:<in|out>   on:<port>:<mask>   off:<port>:<mask>
///   toggle:<port>:<mask>  write:<port>:<byte>
///   read-pin:<port>:<mask>  read:<port>
#[derive(Parser)]
#[clap(version, verbatim_doc_comment)]
struct Args {
    /// Use an in-memory simulation of the board instead of the hardware.
    #[clap(long)]
    simulate: bool,

    /// Make the simulated host refuse the access to I/O ports.
    #[clap(long, requires = "simulate")]
    deny_privilege: bool,

    /// Operations to perform.
    #[clap(required = true)]
    commands: Vec<Command>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let result = if args.simulate {
        let mut space = SimulatedIoSpace::new(registers::WINDOW_START, registers::WINDOW_LEN);
        if args.deny_privilege {
            space = space.denying_privilege();
        }
        run(space, &args.commands)
    } else {
        run_on_hardware(&args.commands)
    };

    if let Err(e) = result {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    }
}

#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
fn run_on_hardware(commands: &[Command]) -> Result<(), Box<dyn Error>> {
    run(
        portio::PortIoSpace::new(registers::WINDOW_START, registers::WINDOW_LEN),
        commands,
    )
}

#[cfg(not(all(target_os = "linux", target_arch = "x86_64")))]
fn run_on_hardware(_commands: &[Command]) -> Result<(), Box<dyn Error>> {
    Err("I/O port access is only supported on Linux x86-64, use --simulate".into())
}

fn run<S: IoSpace>(space: S, commands: &[Command]) -> Result<(), Box<dyn Error>> {
    let mut gpio = PortController::initialized(space)?;
    for command in commands {
        log::debug!("Executing {:?}", command);
        if let Some(output) = command.execute(&mut gpio)? {
            println!("{}", output);
        }
    }
    Ok(())
}
