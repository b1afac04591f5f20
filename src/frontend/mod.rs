// Copyright (c) 2025 Jetgen
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

pub mod compiler_args;
pub mod prj_generator;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use sha2::{Digest, Sha256};

use crate::parser::{self, Config};
use crate::toolchain::Toolchain;
use crate::{info, task};

/// Переводит путь в формат prj файла: разделители всегда прямые слэши,
/// независимо от платформы на которой запущен jetgen
pub fn to_prj_format(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Фронтенд функция полного этапа генерации: собирает итоговый конфиг из
/// toml файлов и пишет prj файл в каталог сборки. Возвращает путь к файлу
pub fn generate(paths: Vec<String>, build_to_profile: bool) -> Result<PathBuf, Box<dyn Error>> {
    let config = parser::load(paths)?;
    let jet = Toolchain::from_config(&config);

    write_project_file(&config, &jet, build_to_profile)
}

/// Пишет prj файл с кэшированием по отпечатку содержимого. Если отпечаток
/// совпал с сохранённым, файл не перезаписывается, mtime не меняется и
/// компилятор не запускает лишнюю пересборку
pub fn write_project_file(
    config: &Config,
    jet: &Toolchain,
    build_to_profile: bool,
) -> Result<PathBuf, Box<dyn Error>> {
    task!("Generate {}.prj", config.package.output_name);

    let build_dir = config.build_dir();
    let cache_dir = config.cache_dir();
    let prj_path = build_dir.join(format!("{}.prj", config.package.output_name));
    let lock_file = cache_dir.join("prj.lock");

    let content = prj_generator::project_file_content(config, jet, build_to_profile);
    let current_fingerprint = generate_fingerprint(&content);

    if prj_path.exists() && lock_file.exists() {
        let saved_fingerprint = fs::read_to_string(&lock_file)?;

        // Если текущий отпечаток совпадает с отпечатком из .lock файла то
        // ничего не изменилось и писать ничего не нужно
        if saved_fingerprint == current_fingerprint {
            info!("{} Project file is up-to-date", "CACHED:".green());
            return Ok(prj_path);
        }
    }

    fs::create_dir_all(&build_dir)?;
    fs::create_dir_all(&cache_dir)?;

    fs::write(&prj_path, content)?;
    fs::write(&lock_file, current_fingerprint)?;

    Ok(prj_path)
}

/// Эта функция получает текст prj файла и генерирует его хэш
fn generate_fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);

    format!("{:x}", hasher.finalize())
}
