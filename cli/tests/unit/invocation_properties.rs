//! Property tests for playbook argument assembly.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use ansible_provision::domain::command::{playbook_arguments, verbosity_argument};
use ansible_provision::domain::environment::{FORCE_COLOR_VAR, NO_COLOR_VAR, build_environment};
use ansible_provision::domain::{ProvisionerConfig, StringOrList};
use proptest::prelude::*;

fn machine_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}"
}

fn raw_token() -> impl Strategy<Value = String> {
    "--[a-z]{1,10}(=[a-z0-9]{1,5})?"
}

proptest! {
    /// Without a configured limit, `--limit=<machine>` appears exactly once.
    #[test]
    fn prop_default_limit_is_machine_name(name in machine_name()) {
        let cfg = ProvisionerConfig {
            playbook: PathBuf::from("site.yml"),
            ..ProvisionerConfig::default()
        };
        let args = playbook_arguments(&cfg, &name, Path::new("inv")).into_vec();
        let expected = format!("--limit={name}");
        prop_assert_eq!(args.iter().filter(|a| **a == expected).count(), 1);
        prop_assert_eq!(&args[0], &expected);
    }

    /// Raw arguments follow every named flag, in the caller's order.
    #[test]
    fn prop_raw_arguments_come_last(
        raw in prop::collection::vec(raw_token(), 1..6),
        sudo in any::<bool>(),
        with_tags in any::<bool>(),
    ) {
        let cfg = ProvisionerConfig {
            playbook: PathBuf::from("site.yml"),
            sudo,
            tags: with_tags.then(|| StringOrList::One("t".into())),
            start_at_task: Some("first".into()),
            raw_arguments: Some(StringOrList::Many(raw.clone())),
            ..ProvisionerConfig::default()
        };
        let args = playbook_arguments(&cfg, "m", Path::new("inv")).into_vec();
        let tail = &args[args.len() - raw.len()..];
        prop_assert_eq!(tail, raw.as_slice());
        let start_at = args.iter().position(|a| a == "--start-at-task=first").unwrap();
        prop_assert_eq!(start_at, args.len() - raw.len() - 1);
    }

    /// A run of `v` (optionally dash-prefixed) maps to the same run.
    #[test]
    fn prop_verbosity_keeps_v_run(count in 1usize..8, dash in any::<bool>()) {
        let run = "v".repeat(count);
        let input = if dash { format!("-{run}") } else { run.clone() };
        let flag = verbosity_argument(Some(&input));
        prop_assert_eq!(flag, Some(format!("-{run}")));
    }

    /// Exactly one color variable is set.
    #[test]
    fn prop_exactly_one_color_variable(color in any::<bool>()) {
        let env = build_environment(color);
        prop_assert!(env.contains_key(FORCE_COLOR_VAR) != env.contains_key(NO_COLOR_VAR));
    }
}
