// Copyright (c) 2025 Jetgen
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use crate::frontend::{compiler_args, to_prj_format};
use crate::parser::{AppType, Config};
use crate::toolchain::Toolchain;

/// Собирает полный текст prj файла: сначала аргументы компилятора построчно,
/// затем сырые опции пользователя, затем блок на каждый элемент classpath и
/// в конце вспомогательные модули. Формат строк фиксирован парсером
/// компилятора и менять его нельзя
pub fn project_file_content(config: &Config, jet: &Toolchain, build_to_profile: bool) -> String {
    let mut prj = String::new();

    for arg in compiler_args::compiler_args(config, jet, build_to_profile) {
        prj.push_str(&arg);
        prj.push('\n');
    }

    // Опции пользователя попадают в файл как есть, строка в строку
    for option in &config.compiler.options {
        prj.push_str(option);
        prj.push('\n');
    }

    for dep in &config.classpath {
        match config.package.app_type {
            AppType::Plain | AppType::DynamicLibrary | AppType::WindowsService => {
                prj.push_str(&format!(
                    "!classpathentry {}\n",
                    to_prj_format(&config.path_relative_to_build_dir(&dep.path))
                ));
            }

            AppType::WebApp => {
                // Основной артефакт разворачивается в classes, библиотеки в
                // lib внутри каталога веб приложения
                let deploy_base = config
                    .webapp
                    .as_ref()
                    .map(|w| w.deploy_base())
                    .unwrap_or_default();

                let entry_path = if dep.main {
                    ":/WEB-INF/classes".to_string()
                } else {
                    let file_name = dep
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    format!(":/WEB-INF/lib/{}", file_name)
                };

                prj.push_str(&format!(
                    "!classloaderentry webapp webapps/{}{}\n",
                    deploy_base, entry_path
                ));
            }
        }

        // Только явно заданные директивы, у блока без них остаётся одна
        // строка объявления и терминатор
        if let Some(optimize) = dep.optimize {
            prj.push_str(&format!("  -optimize={}\n", optimize.jet_value()));
        }

        if let Some(protect) = dep.protect {
            prj.push_str(&format!("  -protect={}\n", protect.jet_value()));
        }

        if let Some(pack) = dep.pack {
            prj.push_str(&format!("  -pack={}\n", pack.jet_value()));
        }

        prj.push_str("!end\n");
    }

    for module in modules(config, jet) {
        prj.push_str(&format!("!module {}\n", module));
    }

    prj
}

/// Вспомогательные модули в хвосте prj файла: иконка приложения (только на
/// Windows) и usage профиль если он уже снят и лежит на диске
fn modules(config: &Config, jet: &Toolchain) -> Vec<String> {
    let mut modules = Vec::new();

    if jet.target_os.is_windows() {
        if let Some(icon) = &config.package.icon {
            modules.push(to_prj_format(&config.absolute(icon)));
        }
    }

    let exec_profiles = config.exec_profiles();
    if exec_profiles.usg.exists() {
        modules.push(to_prj_format(&exec_profiles.usg));
    }

    modules
}
