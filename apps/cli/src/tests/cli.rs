// Unit tests for command-line parsing

use crate::cli::{Cli, Commands, NetworkArg, PurgeActionArg};

use ccu_client::{v2, v3};

use clap::{CommandFactory, Parser};

#[test]
fn given_cli_definition_when_debug_asserted_then_consistent() {
    Cli::command().debug_assert();
}

/// **VALUE**: Flags the user leaves out stay unset on the request.
///
/// **WHY THIS MATTERS**: Defaults belong to the client. A CLI that filled in its own
/// would drift from the library's defaults.
#[test]
fn given_purge_without_flags_when_parsed_then_request_fields_unset() {
    // GIVEN/WHEN: A bare purge
    let cli = Cli::try_parse_from(["ccu", "purge", "https://www.example.com/a.css"])
        .expect("Should parse");

    // THEN: Only objects are set
    let Commands::Purge(args) = cli.command else {
        panic!("Expected purge command");
    };
    let request = args.to_request();
    assert_eq!(request.queue, "");
    assert_eq!(request.purge_type, None);
    assert_eq!(request.action, None);
    assert_eq!(request.domain, None);
    assert_eq!(request.objects, vec!["https://www.example.com/a.css"]);
}

#[test]
fn given_purge_with_flags_when_parsed_then_mapped_onto_v2_request() {
    let cli = Cli::try_parse_from([
        "ccu",
        "purge",
        "--queue",
        "emergency",
        "--type",
        "cpcode",
        "--action",
        "invalidate",
        "--domain",
        "staging",
        "12345",
        "67890",
    ])
    .expect("Should parse");

    let Commands::Purge(args) = cli.command else {
        panic!("Expected purge command");
    };
    assert_eq!(args.action, Some(PurgeActionArg::Invalidate));
    assert_eq!(args.domain, Some(NetworkArg::Staging));

    let request = args.to_request();
    assert_eq!(request.queue_name(), "emergency");
    assert_eq!(request.purge_type, Some(v2::PurgeType::Cpcode));
    assert_eq!(request.action, Some(v2::PurgeAction::Invalidate));
    assert_eq!(request.domain, Some(v2::Domain::Staging));
    assert_eq!(request.objects.len(), 2);
}

#[test]
fn given_purge_v3_with_flags_when_parsed_then_path_follows_flags() {
    let cli = Cli::try_parse_from([
        "ccu",
        "purge-v3",
        "--type",
        "tag",
        "--action",
        "delete",
        "--network",
        "staging",
        "--hostname",
        "www.example.com",
        "--section",
        "ccu",
        "homepage",
    ])
    .expect("Should parse");

    let Commands::PurgeV3(args) = cli.command else {
        panic!("Expected purge-v3 command");
    };
    assert_eq!(args.section.as_deref(), Some("ccu"));

    let request = args.to_request();
    assert_eq!(request.path(), "/ccu/v3/delete/tag/staging");
    assert_eq!(request.hostname.as_deref(), Some("www.example.com"));
    assert_eq!(request.network, Some(v3::Network::Staging));
}

#[test]
fn given_global_flags_after_subcommand_when_parsed_then_accepted() {
    let cli = Cli::try_parse_from(["ccu", "status", "abc", "--timeout", "30", "-v"])
        .expect("Should parse");

    assert_eq!(cli.timeout, Some(30));
    assert!(cli.verbose);
    assert!(matches!(cli.command, Commands::Status { ref purge_id } if purge_id == "abc"));
}

#[test]
fn given_purge_without_objects_when_parsed_then_rejected() {
    assert!(Cli::try_parse_from(["ccu", "purge"]).is_err());
    assert!(Cli::try_parse_from(["ccu", "purge-v3"]).is_err());
}

#[test]
fn given_unknown_type_when_parsed_then_rejected() {
    assert!(Cli::try_parse_from(["ccu", "purge", "--type", "tag", "x"]).is_err());
}
