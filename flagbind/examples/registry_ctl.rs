//! Example CLI binding a configuration record to flags and environment
//! variables.
//!
//! Try:
//!
//! ```text
//! cargo run --example registry_ctl -- --db-url postgres://localhost/registry -v
//! REGCTL_DB_URL=postgres://db.prod/registry cargo run --example registry_ctl
//! ```

use std::io::{self, Write};
use std::time::Duration;

use flagbind::{Builder, Record};

#[derive(Record)]
struct Settings {
    #[flag(flag = "db-url", short = "d", help = "database connection string")]
    db_url: String,
    #[flag(flag = "timeout", help = "per-request timeout")]
    timeout: Duration,
    #[flag(flag = "replicas", help = "replica endpoints, repeatable")]
    replicas: Vec<String>,
    #[flag(flag = "verbose", short = "v")]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let mut settings = Settings {
        db_url: "postgres://localhost/registry".to_owned(),
        timeout: Duration::from_secs(30),
        replicas: Vec::new(),
        verbose: false,
    };

    let mut builder = Builder::new();
    builder.config.env_prefix = "REGCTL_".to_owned();
    let mut set = builder.build(&mut settings);
    set.parse(std::env::args().skip(1)).expect("exit mode handles failures");

    let summary: Vec<String> = set
        .flags()
        .map(|flag| format!("--{} = {} ({})", flag.name, flag.value, flag.kind))
        .collect();
    drop(set);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "connecting to {}", settings.db_url)?;
    if settings.verbose {
        for line in summary {
            writeln!(stdout, "  {line}")?;
        }
    }
    Ok(())
}
