use clap::Parser;
use microkit::cli::{Cli, Commands};
use microkit::infrastructure::logging::{ConsoleTarget, LogFormat};

#[test]
fn test_parse_serve() {
    let cli = Cli::try_parse_from(["microkit", "serve", "--name", "billing"]).unwrap();

    match cli.command {
        Commands::Serve(args) => {
            assert_eq!(args.name, "billing");
            assert_eq!(args.service_version, env!("CARGO_PKG_VERSION"));
        }
        Commands::Show(_) => panic!("Wrong command"),
    }
    assert!(!cli.json);
}

#[test]
fn test_parse_show_with_globals() {
    let cli = Cli::try_parse_from([
        "microkit",
        "show",
        "-n",
        "orders",
        "--service-version",
        "2.3.1",
        "--json",
        "--log-format",
        "json",
        "--log-level",
        "debug",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.log_format, LogFormat::Json);

    let log_config = cli.log_config();
    assert_eq!(log_config.level, "debug");
    assert!(log_config.log_dir.is_none());
    // Logs stay off stdout so `--json` output parses cleanly
    assert_eq!(log_config.console, ConsoleTarget::Stderr);

    match cli.command {
        Commands::Show(args) => {
            assert_eq!(args.name, "orders");
            assert_eq!(args.service_version, "2.3.1");
        }
        Commands::Serve(_) => panic!("Wrong command"),
    }
}

#[test]
fn test_name_defaults_to_empty() {
    temp_env::with_var_unset("MICROKIT_DEFAULT_NAME", || {
        let cli = Cli::try_parse_from(["microkit", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert!(args.name.is_empty()),
            Commands::Show(_) => panic!("Wrong command"),
        }
    });
}

#[test]
fn test_rejects_unknown_log_format() {
    let result = Cli::try_parse_from(["microkit", "serve", "--log-format", "xml"]);
    assert!(result.is_err());
}

#[test]
fn test_requires_subcommand() {
    assert!(Cli::try_parse_from(["microkit"]).is_err());
}
