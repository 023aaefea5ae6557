//! Build automation tasks for the timer-calc project.
//!
//! Run with: `cargo xtask <command>`

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

/// Firmware binary built by `build` and `uf2`.
const FIRMWARE: &str = "timer_calc";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for timer-calc", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: host tests, library and firmware for both boards, docs
    CheckAll,
    /// Build the firmware for a board
    Build {
        #[arg(long, default_value = "pico1")]
        board: Board,
    },
    /// Build UF2 firmware file for flashing to Pico
    Uf2 {
        #[arg(long, default_value = "pico1")]
        board: Board,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Board {
    Pico1,
    Pico2,
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Board::Pico1 => write!(f, "pico1"),
            Board::Pico2 => write!(f, "pico2"),
        }
    }
}

impl Board {
    fn target(self) -> &'static str {
        match self {
            Board::Pico1 => "thumbv6m-none-eabi",
            Board::Pico2 => "thumbv8m.main-none-eabihf",
        }
    }

    fn features(self) -> String {
        format!("{self},arm")
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Build { board } => build_firmware(board),
        Commands::Uf2 { board } => build_uf2(board),
    }
}

fn check_all() -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", "==> Running host tests...".cyan());
    let host_target = host_target();
    match host_target.as_deref() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }

    let mut host_test_cmd = Command::new("cargo");
    host_test_cmd
        .current_dir(&workspace_root)
        .args(["test", "--lib", "--tests"]);

    if let Some(target) = host_target {
        host_test_cmd.arg("--target").arg(target);
    }

    host_test_cmd.args(["--no-default-features", "--features", "host"]);

    if !run_command(&mut host_test_cmd) {
        return ExitCode::FAILURE;
    }

    for board in [Board::Pico1, Board::Pico2] {
        println!(
            "\n{}",
            format!("==> Building library and firmware ({board})...").cyan()
        );
        if !build_quiet(board, &["build", "--lib"]) || !build_firmware_ok(board, false) {
            return ExitCode::FAILURE;
        }
    }

    println!("\n{}", "==> Building documentation...".cyan());
    if !build_quiet(Board::Pico2, &["doc", "--no-deps", "--lib"]) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed!".green().bold());
    ExitCode::SUCCESS
}

fn build_quiet(board: Board, args: &[&str]) -> bool {
    let features = board.features();
    run_command(
        Command::new("cargo")
            .current_dir(workspace_root())
            .args(args)
            .args([
                "--target",
                board.target(),
                "--features",
                &features,
                "--no-default-features",
            ]),
    )
}

fn build_firmware_ok(board: Board, release: bool) -> bool {
    let mut args = vec!["build", "--bin", FIRMWARE];
    if release {
        args.push("--release");
    }
    build_quiet(board, &args)
}

fn build_firmware(board: Board) -> ExitCode {
    println!(
        "{}",
        format!("Building '{FIRMWARE}' with features: {}", board.features()).cyan()
    );

    if build_firmware_ok(board, false) {
        println!("{}", "Build successful!".green());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_uf2(board: Board) -> ExitCode {
    let workspace_root = workspace_root();
    let target = board.target();

    println!("{}", format!("Building UF2 for '{FIRMWARE}' ({board})").cyan());
    println!("  Features: {}", board.features().bright_black());
    println!("  Target: {}", target.bright_black());

    // Build in release mode for UF2
    if !build_firmware_ok(board, true) {
        return ExitCode::FAILURE;
    }

    // Convert to UF2 using elf2uf2-rs
    let elf_path = format!("target/{target}/release/{FIRMWARE}");
    let uf2_path = format!("{FIRMWARE}_{board}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());

    if run_command(
        Command::new("elf2uf2-rs")
            .current_dir(&workspace_root)
            .args([&elf_path, &uf2_path]),
    ) {
        println!("{}", format!("UF2 created: {uf2_path}").green().bold());
        println!("{}", "Ready to drag-and-drop to your Pico!".bright_black());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        ExitCode::FAILURE
    }
}

fn workspace_root() -> std::path::PathBuf {
    // `cargo xtask` runs from the workspace root.
    std::env::current_dir().expect("Failed to get current directory")
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        if let Some(host) = line.strip_prefix("host: ") {
            return Some(host.trim().to_string());
        }
    }
    None
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
