use std::path::PathBuf;

use glyphmd::config::{
    ConfigFlags, ThemeMode, load_config_flags, parse_flag_tokens, save_config_flags,
};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".glyphmdrc");
    let content = r#"
# comment
--plain

--theme light

--log-file=glyphmd.log
--editor code --wait
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.plain);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.log_file, Some(PathBuf::from("glyphmd.log")));
    assert_eq!(flags.editor.as_deref(), Some("code --wait"));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".glyphmdrc");
    let content = "--plain\n--theme light\n--width 72\n--log-file file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "glyphmd".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
        "--editor".to_string(),
        "hx".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.plain, "file flags should remain enabled");
    assert_eq!(effective.editor.as_deref(), Some("hx"), "cli flags should be applied");
    assert_eq!(effective.theme, Some(ThemeMode::Dark), "cli should override theme");
    assert_eq!(effective.width, Some(72));
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_local_override_wins_over_global() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("global");
    let local = dir.path().join("local");
    save_config_flags(
        &global,
        &ConfigFlags {
            width: Some(120),
            theme: Some(ThemeMode::Dark),
            ..ConfigFlags::default()
        },
    )
    .unwrap();
    save_config_flags(
        &local,
        &ConfigFlags {
            width: Some(80),
            ..ConfigFlags::default()
        },
    )
    .unwrap();

    let merged = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap());
    assert_eq!(merged.width, Some(80));
    assert_eq!(merged.theme, Some(ThemeMode::Dark));
}
