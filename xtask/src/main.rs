// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test runner for the bird survey workspace.
//!
//! `cargo xtask test` runs the `SQLite` suites. `cargo xtask test-mariadb`
//! runs the ignored persistence tests against a throwaway `MariaDB`
//! container, which plain `cargo test` never needs.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::io;
use std::process::Output;
use std::thread::sleep;
use std::time::Duration;

use clap::{Args as ClapArgs, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context, eyre::eyre};
use duct::{Expression, cmd};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const PERSISTENCE_PACKAGE: &str = "bird-survey-persistence";
const BACKEND_TEST_FILTER: &str = "backend_validation_tests";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run every `SQLite` test, including doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Run the `MariaDB` backend tests in a Docker container
    #[command(visible_alias = "tm")]
    TestMariadb(MariadbOptions),
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::Test => test(),
            Self::TestMariadb(options) => test_mariadb(&options),
        }
    }
}

#[derive(Clone, Debug, ClapArgs)]
struct MariadbOptions {
    /// Host port mapped to the container's 3306
    #[arg(long, default_value_t = 3307)]
    port: u16,

    /// Container image to test against
    #[arg(long, default_value = "mariadb:11")]
    image: String,

    /// Seconds to wait for the server to accept connections
    #[arg(long, default_value_t = 30)]
    wait_secs: u64,
}

/// Throwaway database server used by `test-mariadb`.
struct TestDatabase {
    container: &'static str,
    database: &'static str,
    user: &'static str,
    password: &'static str,
    port: u16,
}

impl TestDatabase {
    const fn new(port: u16) -> Self {
        Self {
            container: "bird-survey-test-mariadb",
            database: "bird_survey_test",
            user: "bird_survey",
            password: "test_password",
            port,
        }
    }

    fn url(&self) -> String {
        format!(
            "mysql://{}:{}@127.0.0.1:{}/{}",
            self.user, self.password, self.port, self.database
        )
    }

    fn start(&self, image: &str) -> Result<()> {
        self.remove();
        cmd!(
            "docker",
            "run",
            "--name",
            self.container,
            "-e",
            format!("MARIADB_DATABASE={}", self.database),
            "-e",
            format!("MARIADB_USER={}", self.user),
            "-e",
            format!("MARIADB_PASSWORD={}", self.password),
            "-e",
            "MARIADB_RANDOM_ROOT_PASSWORD=1",
            "-p",
            format!("{}:3306", self.port),
            "-d",
            image
        )
        .run_with_trace()
        .wrap_err("Failed to start MariaDB container")?;
        Ok(())
    }

    fn wait_until_ready(&self, wait_secs: u64) -> bool {
        (1..=wait_secs).any(|attempt| {
            sleep(Duration::from_secs(1));
            tracing::debug!(attempt, "Pinging MariaDB");
            cmd!(
                "docker",
                "exec",
                self.container,
                "mariadb",
                "-u",
                self.user,
                format!("-p{}", self.password),
                "-e",
                "SELECT 1"
            )
            .stdout_null()
            .stderr_null()
            .run()
            .is_ok()
        })
    }

    /// Stops and removes the container. Missing containers are not an error.
    fn remove(&self) {
        let _ = cmd!("docker", "rm", "--force", self.container)
            .stdout_null()
            .stderr_null()
            .run();
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        tracing::info!(container = self.container, "Removing MariaDB container");
        self.remove();
    }
}

/// Runs the `SQLite` suites. The `mysql` feature stays off so no `MySQL`
/// client library is needed.
fn test() -> Result<()> {
    cmd!("cargo", "test", "--workspace", "--all-targets").run_with_trace()?;
    cmd!("cargo", "test", "--workspace", "--doc").run_with_trace()?;
    Ok(())
}

/// Runs the ignored persistence tests against a fresh `MariaDB` server.
///
/// The container is removed when this returns, whether the tests pass,
/// fail, or the server never comes up.
fn test_mariadb(options: &MariadbOptions) -> Result<()> {
    cmd!("docker", "--version")
        .run_with_trace()
        .wrap_err("Docker is not available. Please install Docker.")?;

    let db = TestDatabase::new(options.port);
    db.start(&options.image)?;

    tracing::info!(wait_secs = options.wait_secs, "Waiting for MariaDB");
    if !db.wait_until_ready(options.wait_secs) {
        return Err(eyre!(
            "MariaDB did not accept connections within {} seconds",
            options.wait_secs
        ));
    }

    cmd!(
        "cargo",
        "test",
        "--package",
        PERSISTENCE_PACKAGE,
        "--features",
        "mysql",
        BACKEND_TEST_FILTER,
        "--",
        "--ignored",
        "--test-threads=1"
    )
    .env("DATABASE_URL", db.url())
    .env("BIRD_SURVEY_TEST_BACKEND", "mariadb")
    .run_with_trace()
    .wrap_err("MariaDB backend tests failed")?;

    tracing::info!("MariaDB backend tests passed");
    Ok(())
}

trait ExpressionExt {
    /// Logs the command, runs it, and logs it again if it fails.
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run()
            .inspect_err(|_| tracing::error!("failed to run command: {:?}", self))
    }
}
