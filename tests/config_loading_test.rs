//! Integration tests for configuration resolution: search path, format
//! detection, environment precedence and defaulting.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{temp_dir, with_isolated_env, write_config, MapSource};
use microkit::domain::models::DEFAULT_NAMESPACE;
use microkit::{ConfigError, ConfigurationStore, SearchPaths};

#[test]
fn test_load_from_home_directory() {
    let home = temp_dir();
    write_config(
        home.path(),
        ".mk-home-svc/config.yaml",
        "name: orders\nnamespace: acme\nmicro_register_ttl: 30\n",
    );

    with_isolated_env(home.path(), &[], || {
        let store = ConfigurationStore::new();
        store.load("mk-home-svc").unwrap();

        assert!(store.is_initialized());
        assert_eq!(store.name(), "orders");
        assert_eq!(store.namespace(), "acme");
        assert_eq!(store.registration_timing().ttl, Duration::from_secs(30));
    });
}

#[test]
fn test_environment_overrides_file() {
    let home = temp_dir();
    write_config(
        home.path(),
        ".mk-env-svc/config.toml",
        "name = \"from-file\"\nnamespace = \"file-ns\"\nmicro_register_interval = 5\n",
    );

    with_isolated_env(
        home.path(),
        &[("NAME", "from-env"), ("MICRO_REGISTER_INTERVAL", "12")],
        || {
            let store = ConfigurationStore::new();
            store.load("mk-env-svc").unwrap();

            assert_eq!(store.name(), "from-env");
            assert_eq!(store.namespace(), "file-ns");
            assert_eq!(
                store.registration_timing().interval,
                Duration::from_secs(12)
            );
        },
    );
}

#[test]
fn test_environment_values_are_not_reinterpreted() {
    let home = temp_dir();
    write_config(
        home.path(),
        ".mk-verbatim-svc/config.yaml",
        "name: from-file\nnamespace: file-ns\n",
    );

    with_isolated_env(
        home.path(),
        &[("NAME", "0123"), ("NAMESPACE", "1.10"), ("MICRO_REGISTER_TTL", "30")],
        || {
            let store = ConfigurationStore::new();
            store.load("mk-verbatim-svc").unwrap();

            assert_eq!(store.name(), "0123");
            assert_eq!(store.namespace(), "1.10");
            assert_eq!(store.service_name(&store.name()), "1.10.0123");
            assert_eq!(store.registration_timing().ttl, Duration::from_secs(30));
        },
    );
}

#[test]
fn test_dotenv_config_file() {
    let home = temp_dir();
    write_config(
        home.path(),
        ".mk-dotenv-svc/config.env",
        "NAME=ledger\nNAMESPACE=acme\nMICRO_REGISTER_INTERVAL=10\n",
    );

    with_isolated_env(home.path(), &[], || {
        let store = ConfigurationStore::new();
        store.load("mk-dotenv-svc").unwrap();

        assert_eq!(store.name(), "ledger");
        assert_eq!(store.broker_topic("entries"), "topic.acme.entries");
        assert_eq!(
            store.registration_timing().interval,
            Duration::from_secs(10)
        );
    });
}

#[test]
fn test_keys_do_not_expose_process_environment() {
    let home = temp_dir();
    write_config(home.path(), ".mk-keys-svc/config.yaml", "namespace: acme\n");

    with_isolated_env(home.path(), &[("NAME", "keys"), ("MK_API_TOKEN", "secret")], || {
        let store = ConfigurationStore::new();
        store.load("mk-keys-svc").unwrap();

        let keys = store.keys();
        assert_eq!(keys, vec!["name".to_string(), "namespace".to_string()]);
        assert!(!keys.contains(&"home".to_string()));
        assert!(!keys.contains(&"mk_api_token".to_string()));
        assert_eq!(store.get_string("mk_api_token"), "secret");
    });
}

#[test]
fn test_empty_default_name_searches_micro() {
    let home = temp_dir();
    write_config(home.path(), ".micro/config.json", r#"{"name": "fallback", "namespace": "mk"}"#);

    with_isolated_env(home.path(), &[], || {
        let empty = ConfigurationStore::new();
        empty.load("").unwrap();

        let micro = ConfigurationStore::new();
        micro.load("micro").unwrap();

        assert_eq!(empty.settings(), micro.settings());
        assert_eq!(empty.name(), "fallback");
        assert_eq!(SearchPaths::for_name(""), SearchPaths::for_name("micro"));
    });
}

#[test]
fn test_missing_file_is_not_fatal() {
    let home = temp_dir();

    with_isolated_env(home.path(), &[], || {
        let store = ConfigurationStore::new();
        store.load("mk-nowhere-svc").unwrap();

        assert!(store.is_initialized());
        assert_eq!(store.name(), "");
        assert_eq!(store.namespace(), DEFAULT_NAMESPACE);
        assert_eq!(store.registration_timing().ttl, Duration::ZERO);
    });
}

#[test]
fn test_env_only_configuration() {
    let home = temp_dir();

    with_isolated_env(
        home.path(),
        &[("NAME", "env-svc"), ("NAMESPACE", "env-ns")],
        || {
            let store = ConfigurationStore::new();
            store.load("mk-env-only-svc").unwrap();

            assert_eq!(store.name(), "env-svc");
            assert_eq!(store.service_name(&store.name()), "env-ns.env-svc");
        },
    );
}

#[test]
fn test_malformed_file_leaves_store_uninitialized() {
    let home = temp_dir();
    write_config(home.path(), ".mk-broken-svc/config.yaml", "name: [unclosed\n");

    with_isolated_env(home.path(), &[], || {
        let store = ConfigurationStore::new();
        let err = store.load("mk-broken-svc").unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
        assert!(err.to_string().starts_with("Fatal error config file"));
        assert!(!store.is_initialized());
    });
}

#[test]
fn test_every_search_location_is_honoured() {
    let home = temp_dir();

    // Stand-ins for /etc/<name>, ~/.<name> and `.`; only one holds a file
    for i in 0..3 {
        let locations = [temp_dir(), temp_dir(), temp_dir()];
        let marker = format!("location-{i}");
        write_config(locations[i].path(), "config.yml", &format!("name: {marker}\n"));

        let paths = SearchPaths::new(locations.iter().map(|d| d.path().to_path_buf()));
        with_isolated_env(home.path(), &[], || {
            let store = ConfigurationStore::new();
            store.load_with(&paths).unwrap();
            assert_eq!(store.name(), marker);
        });
    }
}

#[test]
fn test_earlier_location_wins() {
    let first = temp_dir();
    let second = temp_dir();
    write_config(first.path(), "config.yaml", "name: first\n");
    write_config(second.path(), "config.json", r#"{"name": "second", "namespace": "ns2"}"#);

    with_isolated_env(first.path(), &[], || {
        let store = ConfigurationStore::new();
        store
            .load_with(&SearchPaths::new([first.path(), second.path()]))
            .unwrap();

        assert_eq!(store.name(), "first");
        // Files are not merged; only the first one found is read
        assert_eq!(store.namespace(), DEFAULT_NAMESPACE);
    });
}

#[test]
fn test_unrecognized_keys_are_preserved() {
    let home = temp_dir();
    write_config(
        home.path(),
        ".mk-extra-svc/config.yaml",
        "name: catalog\nredis:\n  addr: cache:6379\n  pool: 8\nretries: 3\n",
    );

    with_isolated_env(home.path(), &[], || {
        let store = ConfigurationStore::new();
        store.load("mk-extra-svc").unwrap();

        assert_eq!(store.get_string("redis.addr"), "cache:6379");
        assert_eq!(store.get_int("redis.pool"), 8);
        assert_eq!(store.get_int("retries"), 3);
        assert!(store.keys().contains(&"redis".to_string()));
    });
}

#[test]
fn test_custom_source_is_swappable() {
    let store = ConfigurationStore::new();
    let source = MapSource::new()
        .with("name", "billing")
        .with("namespace", "acme")
        .with("micro_register_ttl", 45);
    store.load_from_source(Arc::new(source));

    assert_eq!(store.broker_topic("orders"), "topic.acme.orders");
    assert_eq!(store.service_name("billing"), "acme.billing");
    assert_eq!(store.registration_timing().ttl, Duration::from_secs(45));
}
