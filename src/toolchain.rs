// Copyright (c) 2025 Jetgen
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use serde::Deserialize;

use crate::parser::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetOs {
    Windows,
    Linux,
    Osx,
}

impl TargetOs {
    pub fn is_windows(self) -> bool {
        matches!(self, TargetOs::Windows)
    }

    /// Платформа на которой запущен сам jetgen, используется когда в конфиге
    /// целевая платформа не указана явно
    pub fn host() -> Self {
        if cfg!(windows) {
            TargetOs::Windows
        } else if cfg!(target_os = "macos") {
            TargetOs::Osx
        } else {
            TargetOs::Linux
        }
    }
}

/// Описание возможностей установленного компилятора. Не все версии тулчейна
/// понимают все аргументы, поэтому генератор сверяется с этими флагами перед
/// тем как что-то выдать
#[derive(Debug, Clone, Copy)]
pub struct Toolchain {
    pub target_os: TargetOs,

    // Умеет ли тулчейн принимать заранее собранный стартовый профиль
    pub startup_profile_generation: bool,

    // Поддерживается ли оптимизация по профилю исполнения
    pub pgo: bool,
}

impl Toolchain {
    pub fn from_config(config: &Config) -> Self {
        Self {
            target_os: config.toolchain.target_os.unwrap_or_else(TargetOs::host),
            startup_profile_generation: config.toolchain.startup_profile_generation,
            pgo: config.toolchain.pgo,
        }
    }
}
