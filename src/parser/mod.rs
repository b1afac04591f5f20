// Copyright (c) 2025 Jetgen
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

pub mod toml_parser;

pub use toml_parser::{
    AppType, ClasspathEntry, Config, ExecProfiles, InlineExpansion, OptimizationType, PackType,
    ProtectionType, StackTraceSupport,
};

use std::error::Error;

/// Загружает и проверяет конфиг. Генераторы дальше по конвейеру считают
/// конфиг валидным и сами ничего не перепроверяют
pub fn load(paths: Vec<String>) -> Result<Config, Box<dyn Error>> {
    let config = toml_parser::load_configs(paths)?;
    validate(&config)?;
    Ok(config)
}

/// Проверки согласованности конфига. Всё что генераторы молча ожидают от
/// входа должно быть отловлено здесь и превращено в понятную ошибку
fn validate(config: &Config) -> Result<(), Box<dyn Error>> {
    if config.package.output_name.is_empty() {
        return Err("package.output-name is required".into());
    }

    match config.package.app_type {
        AppType::Plain | AppType::WindowsService => {
            if config.package.main_class.is_none() {
                return Err(format!(
                    "package.main-class is required for app-type {:?}",
                    config.package.app_type
                )
                .into());
            }
        }
        AppType::DynamicLibrary => {}
        AppType::WebApp => {}
    }

    if config.package.app_type == AppType::WindowsService && config.service.is_none() {
        return Err("[service] section is required for app-type windows-service".into());
    }

    if config.package.app_type == AppType::WebApp {
        match &config.webapp {
            None => return Err("[webapp] section is required for app-type web-app".into()),
            Some(webapp) if !webapp.deploy_name.ends_with(".war") => {
                return Err(format!(
                    "webapp.deploy-name must be a .war name, got {:?}",
                    webapp.deploy_name
                )
                .into());
            }
            Some(_) => {}
        }
    }

    if config.compiler.protect_data && config.compiler.crypt_seed.is_none() {
        return Err("compiler.crypt-seed is required when compiler.protect-data is set".into());
    }

    if let Some(trial) = &config.trial {
        match (&trial.expire_date, trial.expire_in_days) {
            (Some(_), Some(_)) => {
                return Err("trial.expire-date and trial.expire-in-days are mutually exclusive".into());
            }
            (None, None) => {
                return Err("trial requires either expire-date or expire-in-days".into());
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolchain::TargetOs;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn full_config_deserializes() {
        let config: Config = toml::from_str(
            r#"
            [package]
            app-type = "windows-service"
            main-class = "com.example.Daemon"
            output-name = "daemon"
            hide-console = true

            [service]
            name = "backup-daemon"

            [compiler]
            inline-expansion = "very-aggressive"
            stack-trace-support = "none"
            multi-app = true

            [toolchain]
            target-os = "windows"
            pgo = false

            [[classpath]]
            path = "daemon.jar"
            main = true
            protect = "not-required"
            pack = "auto-detect"
            "#,
        )
        .unwrap();

        assert_eq!(config.package.app_type, AppType::WindowsService);
        assert_eq!(config.compiler.inline_expansion, InlineExpansion::VeryAggressive);
        assert_eq!(config.compiler.stack_trace_support, StackTraceSupport::None);
        assert_eq!(config.toolchain.target_os, Some(TargetOs::Windows));
        assert!(!config.toolchain.pgo);
        assert!(config.toolchain.startup_profile_generation);
        assert_eq!(config.classpath[0].protect, Some(ProtectionType::NotRequired));
        assert_eq!(config.classpath[0].pack, Some(PackType::AutoDetect));
    }

    #[test]
    fn defaults_are_filled_in() {
        let config: Config = toml::from_str(
            r#"
            [package]
            output-name = "App"
            "#,
        )
        .unwrap();

        assert_eq!(config.package.app_type, AppType::Plain);
        assert_eq!(config.compiler.inline_expansion, InlineExpansion::Aggressive);
        assert!(config.compiler.stack_allocation);
        assert!(config.pdb.keep_in_build_dir);
        assert_eq!(config.profile.startup_timeout, 20);
        assert!(config.profile.locally);
    }

    #[test]
    fn validate_rejects_service_without_section() {
        let config: Config = toml::from_str(
            r#"
            [package]
            app-type = "windows-service"
            main-class = "com.example.Daemon"
            output-name = "daemon"
            "#,
        )
        .unwrap();

        assert!(validate(&config).is_err());
    }

    #[test]
    fn validate_rejects_missing_main_class() {
        let config: Config = toml::from_str(
            r#"
            [package]
            output-name = "App"
            "#,
        )
        .unwrap();

        assert!(validate(&config).is_err());

        // Библиотеке точка входа не нужна
        let config: Config = toml::from_str(
            r#"
            [package]
            app-type = "dynamic-library"
            output-name = "mylib"
            "#,
        )
        .unwrap();

        assert!(validate(&config).is_ok());
    }

    #[test]
    fn validate_rejects_non_war_deploy_name() {
        let config: Config = toml::from_str(
            r#"
            [package]
            app-type = "web-app"
            output-name = "shop"

            [webapp]
            deploy-name = "shop.zip"
            "#,
        )
        .unwrap();

        assert!(validate(&config).is_err());
    }

    #[test]
    fn validate_rejects_protect_data_without_seed() {
        let config: Config = toml::from_str(
            r#"
            [package]
            main-class = "com.example.Main"
            output-name = "App"

            [compiler]
            protect-data = true
            "#,
        )
        .unwrap();

        assert!(validate(&config).is_err());
    }

    #[test]
    fn validate_rejects_ambiguous_trial() {
        let config: Config = toml::from_str(
            r#"
            [package]
            main-class = "com.example.Main"
            output-name = "App"

            [trial]
            expire-in-days = 30
            expire-date = "15Sep2026"
            expire-message = "over"
            "#,
        )
        .unwrap();

        assert!(validate(&config).is_err());
    }

    #[test]
    fn later_config_files_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();

        let base = dir.path().join("app.toml");
        fs::write(
            &base,
            "[package]\nmain-class = \"com.example.Main\"\noutput-name = \"App\"\n",
        )
        .unwrap();

        let release = dir.path().join("release.toml");
        fs::write(
            &release,
            "[package]\noutput-name = \"AppPro\"\n\n[compiler]\nglobal-optimizer = true\n",
        )
        .unwrap();

        let config = load(vec![
            base.to_string_lossy().into_owned(),
            release.to_string_lossy().into_owned(),
        ])
        .unwrap();

        assert_eq!(config.package.output_name, "AppPro");
        assert_eq!(config.package.main_class.as_deref(), Some("com.example.Main"));
        assert!(config.compiler.global_optimizer);
        assert_eq!(config.base_path, dir.path());
    }

    #[test]
    fn libs_dir_jars_are_appended_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let libs = dir.path().join("libs");
        fs::create_dir_all(&libs).unwrap();
        fs::write(libs.join("b.jar"), "b").unwrap();
        fs::write(libs.join("a.jar"), "a").unwrap();
        fs::write(libs.join("notes.txt"), "skip me").unwrap();

        let config_path = dir.path().join("app.toml");
        fs::write(
            &config_path,
            r#"
            [package]
            main-class = "com.example.Main"
            output-name = "App"
            libs-dir = "libs"

            [[classpath]]
            path = "App.jar"
            main = true
            "#,
        )
        .unwrap();

        let config = load(vec![config_path.to_string_lossy().into_owned()]).unwrap();

        let paths: Vec<PathBuf> = config.classpath.iter().map(|d| d.path.clone()).collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("App.jar"),
                libs.join("a.jar"),
                libs.join("b.jar"),
            ]
        );
        assert!(config.classpath.iter().skip(1).all(|d| !d.main));
    }

    #[test]
    fn exec_profiles_default_to_project_dir_and_output_name() {
        let config: Config = toml::from_str(
            r#"
            [package]
            main-class = "com.example.Main"
            output-name = "App"
            "#,
        )
        .unwrap();

        let mut config = config;
        config.base_path = PathBuf::from("/project");

        let profiles = config.exec_profiles();
        assert_eq!(profiles.usg, PathBuf::from("/project/App.usg"));
        assert_eq!(profiles.startup, PathBuf::from("/project/App.startup"));
        assert_eq!(profiles.jprofile, PathBuf::from("/project/App.jprofile"));
    }
}

