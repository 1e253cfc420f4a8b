//! Environment overlay behaviour: derived variable names, override
//! precedence over command-line values and failure reporting.

use flagbind::{Builder, Config, Error, ErrorHandling, Record};
use serial_test::serial;
use test_helpers::env;

fn builder(prefix: &str) -> Builder {
    Builder {
        name: "app".to_owned(),
        config: Config {
            handling: ErrorHandling::Continue,
            env_support: true,
            env_prefix: prefix.to_owned(),
            ..Config::default()
        },
    }
}

#[derive(Record, Default)]
struct Settings {
    #[flag(flag = "name")]
    name: String,
    #[flag(flag = "port")]
    port: u64,
    #[flag(flag = "dry-run")]
    dry_run: bool,
    #[flag(flag = "hosts")]
    hosts: Vec<String>,
}

#[test]
#[serial]
fn environment_overrides_command_line_values() {
    let _name = env::set_var("APP_NAME", "from-env");
    let _port = env::remove_var("APP_PORT");
    let builder = builder("APP_");
    let mut record = Settings::default();
    let mut set = builder.build(&mut record);
    set.parse(["--name", "from-cli", "--port", "8080"])
        .expect("parse");
    drop(set);
    assert_eq!(record.name, "from-env");
    assert_eq!(record.port, 8080);
}

#[test]
#[serial]
fn empty_variables_never_override() {
    let _name = env::set_var("APP_NAME", "");
    let builder = builder("APP_");
    let mut record = Settings::default();
    let mut set = builder.build(&mut record);
    set.parse(["--name", "from-cli"]).expect("parse");
    drop(set);
    assert_eq!(record.name, "from-cli");
}

#[test]
#[serial]
fn variable_names_replace_dashes_and_carry_the_prefix() {
    let _dry = env::set_var("APP_DRY_RUN", "true");
    let builder = builder("APP_");
    let mut record = Settings::default();
    let mut set = builder.build(&mut record);
    set.parse(Vec::<String>::new()).expect("parse");
    drop(set);
    assert!(record.dry_run);
}

#[test]
#[serial]
fn sequence_overrides_replace_command_line_values() {
    let _hosts = env::set_var("APP_HOSTS", "x,y");
    let builder = builder("APP_");
    let mut record = Settings::default();
    let mut set = builder.build(&mut record);
    set.parse(["--hosts", "a", "--hosts", "b"]).expect("parse");
    drop(set);
    assert_eq!(record.hosts, vec!["x", "y"]);
}

#[test]
#[serial]
fn invalid_variables_are_reported_after_the_full_pass() {
    let _port = env::set_var("APP_PORT", "not-a-number");
    let _name = env::set_var("APP_NAME", "still-applied");
    let builder = builder("APP_");
    let mut record = Settings::default();
    let mut set = builder.build(&mut record);
    let error = set
        .parse(Vec::<String>::new())
        .expect_err("override failure");
    drop(set);
    let Error::EnvOverride { name, value, .. } = error else {
        panic!("expected an override error, got {error}");
    };
    assert_eq!(name, "APP_PORT");
    assert_eq!(value, "not-a-number");
    assert_eq!(record.name, "still-applied");
}

#[test]
#[serial]
fn command_line_failure_short_circuits_the_overlay() {
    let _name = env::set_var("APP_NAME", "from-env");
    let builder = builder("APP_");
    let mut record = Settings::default();
    let mut set = builder.build(&mut record);
    let error = set.parse(["--no-such-flag"]).expect_err("parse failure");
    drop(set);
    assert!(matches!(error, Error::Cli(_)));
    assert_eq!(record.name, "");
}

#[derive(Record, Default)]
struct Outer {
    #[flag(flag = "server")]
    server: Inner,
}

#[derive(Record, Default)]
struct Inner {
    #[flag(flag = "port")]
    port: u64,
}

#[test]
#[serial]
fn nested_flags_derive_dotted_variable_names() {
    let _port = env::set_var("APP_SERVER_PORT", "9090");
    let builder = builder("APP_");
    let mut record = Outer::default();
    let mut set = builder.build(&mut record);
    set.parse(Vec::<String>::new()).expect("parse");
    drop(set);
    assert_eq!(record.server.port, 9090);
}

#[test]
#[serial]
fn help_text_names_the_environment_variable() {
    let builder = builder("APP_");
    let mut record = Settings::default();
    let set = builder.build(&mut record);
    let info = set.lookup("name").expect("registered");
    assert!(info.help.starts_with("ENV: APP_NAME\t"));
}

#[test]
#[serial]
fn custom_name_derivation_wins() {
    let _var = env::set_var("X_port", "7070");
    let mut builder = builder("");
    builder.config.env_name_fn = Some(Box::new(|flag| format!("X_{flag}")));
    let mut record = Settings::default();
    let mut set = builder.build(&mut record);
    set.parse(Vec::<String>::new()).expect("parse");
    drop(set);
    assert_eq!(record.port, 7070);
}
