use planboard_core::db::open_db_in_memory;
use planboard_core::{
    KvRepository, MemoryKvRepository, SettingsService, SqliteKvRepository, Theme, THEME_KEY,
};

#[test]
fn missing_theme_defaults_to_light() {
    let repo = MemoryKvRepository::new();
    let settings = SettingsService::new(&repo);

    assert_eq!(settings.load_theme(), Theme::Light);
    assert!(repo.is_empty());
}

#[test]
fn saved_theme_is_stored_by_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let settings = SettingsService::new(&repo);

    settings.save_theme(Theme::Solaris).unwrap();
    assert_eq!(repo.get(THEME_KEY).unwrap().as_deref(), Some("solaris"));
    assert_eq!(settings.load_theme(), Theme::Solaris);

    settings.save_theme(Theme::Dark).unwrap();
    assert_eq!(settings.load_theme(), Theme::Dark);
}

#[test]
fn unknown_theme_name_is_ignored() {
    let repo = MemoryKvRepository::new();
    repo.put(THEME_KEY, "neon").unwrap();

    let settings = SettingsService::new(&repo);
    assert_eq!(settings.load_theme(), Theme::Light);
    assert_eq!(repo.get(THEME_KEY).unwrap().as_deref(), Some("neon"));
}

#[test]
fn palettes_match_theme_colors() {
    let light = Theme::Light.palette();
    assert_eq!(light.primary, "#3788d8");
    assert_eq!(light.background, "#ffffff");

    let dark = Theme::Dark.palette();
    assert_eq!(dark.background, "#303030");
    assert_eq!(dark.text, "#ffffff");

    let names: Vec<String> = Theme::ALL.iter().map(|theme| theme.to_string()).collect();
    assert_eq!(names, vec!["light", "dark", "minimalist", "solaris"]);
}
