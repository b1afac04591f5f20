// Copyright (c) 2025 Jetgen
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::env;

use colored::Colorize;

/// Это перечисление нужно для удобного распознавания действия которое передаётся
/// вторым аргументом (индекс 1) при запуске jetgen и означает "Что именно сделать?"
/// Если там ничего нет либо такого варианта нет в match, то это Help, то есть
/// вывести справку по использованию jetgen
pub enum Actions {
    Help,
    Prj,
    Profile,
    Args,
}

/// Структура которая используется для глобального хранения аргументов системы
/// сборки и другой общей информации
pub struct BuildSystem {
    pub args: Vec<String>,
}

impl BuildSystem {
    pub fn new() -> Self {
        Self {
            args: env::args().collect(),
        }
    }

    /// Эта функция берёт аргумент действия из args (Второй аргумент, первый индекс)
    /// и возвращает либо Help из Actions либо конкретный вариант. Используется
    /// enum для удобства обработки результата
    pub fn get_action(&mut self) -> Actions {
        if self.args.len() >= 2 {
            return match self.args[1].as_str() {
                "prj"     => Actions::Prj,
                "profile" => Actions::Profile,
                "args"    => Actions::Args,
                _         => Actions::Help,
            }
        }

        // Если аргументов меньше 2 то возвращаем Help
        Actions::Help
    }

    pub fn print_help(&mut self) {
        println!("{} turns a toml project config into Excelsior JET compiler input", "Jetgen".green().bold());
        println!("  - jetgen prj my.toml      | generate {} project file", "prj".red());
        println!("  - jetgen profile my.toml  | generate prj for a {} run", "profile-gathering".red());
        println!("  - jetgen args my.toml     | print compiler command line arguments");
        println!("  - jetgen help             | show help info");
        println!("If you want use multiconfig mode, use");
        println!("  - jetgen prj my.toml my2.toml my3.toml");
    }
}
