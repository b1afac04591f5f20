// Copyright (c) 2025 Jetgen
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use crate::frontend::to_prj_format;
use crate::parser::{AppType, Config, InlineExpansion, StackTraceSupport};
use crate::toolchain::Toolchain;

/// Строит упорядоченный список аргументов компилятора из конфига. Порядок
/// аргументов это часть контракта: парсер компилятора в нескольких местах
/// чувствителен к нему, например -jprofile должен идти вместе с -pgo+,
/// а -expire вместе с -expiremsg. Для одинакового входа список всегда
/// получается байт в байт одинаковым
pub fn compiler_args(config: &Config, jet: &Toolchain, build_to_profile: bool) -> Vec<String> {
    let mut compiler_args: Vec<String> = Vec::new();

    match config.package.app_type {
        AppType::Plain => {
            compiler_args.push(format!("-main={}", config.main_class()));

            // Без явной картинки компилятор ищет сплэш в манифесте артефакта
            match &config.package.splash {
                Some(splash) => {
                    compiler_args.push(format!("-splash={}", to_prj_format(&config.absolute(splash))));
                }
                None => {
                    compiler_args.push("-splashgetfrommanifest+".to_string());
                }
            }
        }

        AppType::DynamicLibrary => {
            compiler_args.push("-gendll+".to_string());
        }

        AppType::WindowsService => {
            compiler_args.push(format!("-servicemain={}", config.main_class()));

            let name = config.service.as_ref().map(|s| s.name.as_str()).unwrap_or_default();
            compiler_args.push(format!("-servicename={}", name));
        }

        AppType::WebApp => {
            compiler_args.push("-apptype=tomcat".to_string());
            compiler_args.push(format!("-appdir={}", to_prj_format(&config.webapp_in_build_dir())));

            if let Some(webapp) = &config.webapp {
                if webapp.hide_config {
                    compiler_args.push("-hideconfiguration+".to_string());
                }

                if !webapp.gen_scripts {
                    compiler_args.push("-gentomcatscripts-".to_string());
                }
            }
        }
    }

    if !config.pdb.keep_in_build_dir {
        compiler_args.push(format!("-pdblocation={}", to_prj_format(&config.pdb_location())));
    }

    // Скрытие консоли имеет смысл только на Windows. Для сервиса консоль
    // прячется только в multi-app режиме, у одиночного сервиса её и так нет
    if jet.target_os.is_windows() && config.package.hide_console {
        match config.package.app_type {
            AppType::WindowsService if !config.compiler.multi_app => {}
            AppType::Plain | AppType::WindowsService | AppType::WebApp => {
                compiler_args.push("-gui+".to_string());
            }
            AppType::DynamicLibrary => {}
        }
    }

    compiler_args.push(format!("-outputname={}", config.package.output_name));
    compiler_args.push("-decor=ht".to_string());

    if config.profile.startup && !build_to_profile {
        compiler_args.push("-saprofmode=ALWAYS".to_string());
        compiler_args.push(format!("-saproftimeout={}", config.profile.startup_timeout));
    }

    if let Some(version_info) = &config.version_info {
        compiler_args.push(format!("-versioninfocompanyname={}", version_info.company));
        compiler_args.push(format!("-versioninfoproductname={}", version_info.product));
        compiler_args.push(format!("-versioninfoproductversion={}", version_info.version));
        compiler_args.push(format!("-versioninfolegalcopyright={}", version_info.copyright));
        compiler_args.push(format!("-versioninfofiledescription={}", version_info.description));
    }

    if config.compiler.multi_app {
        compiler_args.push("-multiapp+".to_string());
    }

    if config.compiler.global_optimizer {
        compiler_args.push("-global+".to_string());
    }

    // Дата и сообщение всегда идут парой
    if let Some(trial) = &config.trial {
        compiler_args.push(format!("-expire={}", trial.expire()));
        compiler_args.push(format!("-expiremsg={}", trial.expire_message));
    }

    if config.compiler.protect_data {
        let seed = config.compiler.crypt_seed.as_deref().unwrap_or_default();
        compiler_args.push(format!("-cryptseed={}", seed));
    }

    let exec_profiles = config.exec_profiles();

    if jet.startup_profile_generation && exec_profiles.startup.exists() {
        compiler_args.push(format!("-startupprofile={}", to_prj_format(&exec_profiles.startup)));
    }

    // Профиль и включение pgo всегда идут вместе. При сборке для снятия
    // профиля старый профиль не подключается
    if jet.pgo && !build_to_profile && exec_profiles.jprofile.exists() {
        compiler_args.push(format!("-jprofile={}", to_prj_format(&exec_profiles.jprofile)));
        compiler_args.push("-pgo+".to_string());
    }

    if let Some(flavor) = &config.runtime.flavor {
        compiler_args.push(format!("-jetrt={}", flavor));
    }

    match config.compiler.inline_expansion {
        InlineExpansion::TinyMethodsOnly => {
            compiler_args.push("-inline-".to_string());
        }
        InlineExpansion::Low => {
            compiler_args.push("-inlinelimit=50".to_string());
            compiler_args.push("-inlinetolimit=250".to_string());
        }
        InlineExpansion::Medium => {
            compiler_args.push("-inlinelimit=100".to_string());
            compiler_args.push("-inlinetolimit=500".to_string());
        }
        InlineExpansion::VeryAggressive => {
            // very-aggressive задаёт только лимиты, дальше поведение совпадает
            // с aggressive
            compiler_args.push("-inlinelimit=250".to_string());
            compiler_args.push("-inlinetolimit=2000".to_string());
        }
        InlineExpansion::Aggressive => {
            // Значения компилятора по умолчанию
        }
    }

    if !config.compiler.stack_allocation {
        compiler_args.push("-genstackalloc-".to_string());
    }

    if !config.package.run_args.is_empty() {
        let quoted_args = config
            .package
            .run_args
            .iter()
            .map(|arg| quote_cmd_line_argument(arg))
            .collect::<Vec<_>>()
            .join(" ");

        compiler_args.push(format!("-runarguments={}", quoted_args));
    }

    if config.compiler.stack_trace_support == StackTraceSupport::Full {
        compiler_args.push("-genstacktrace+".to_string());
    }

    // Значения jvm аргументов могут содержать префикс $(Root), а компилятор
    // внутри prj файла заменяет такие вхождения значением уравнения Root.
    // Поэтому -jetvmprop передаётся процессу компилятора отдельным аргументом,
    // а в prj файл строка попадает в закомментированном виде, чтобы её было
    // видно при разборе проблемной сборки
    compiler_args.push(format!("%{}", jetvm_prop_opt(config, build_to_profile)));

    compiler_args
}

/// Собирает jvm аргументы в одну строку -jetvmprop=, пригодную для передачи
/// компилятору одним аргументом. Строка выдаётся даже когда jvm аргументов
/// нет совсем
pub fn jetvm_prop_opt(config: &Config, build_to_profile: bool) -> String {
    format!("-jetvmprop={}", jvm_args(config, build_to_profile).join(" "))
}

fn jvm_args(config: &Config, build_to_profile: bool) -> Vec<String> {
    let mut jvm_args = config.runtime.jvm_args.clone();

    if config.compiler.stack_trace_support == StackTraceSupport::None {
        jvm_args.push("-Djet.stack.trace=false".to_string());
    }

    if build_to_profile {
        jvm_args.push("-Djet.profiler".to_string());

        let jprofile = config.exec_profiles().jprofile;
        if config.profile.locally {
            jvm_args.push(format!("-Djet.jprof.name={}", to_prj_format(&jprofile)));
        } else {
            // При удалённом профилировании приложение пишет профиль рядом с
            // собой, поэтому достаточно одного имени файла
            let name = jprofile
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            jvm_args.push(format!("-Djet.jprof.name={}", name));
        }
    }

    jvm_args
}

/// Оборачивает аргумент в кавычки если внутри есть пробелы или кавычки,
/// чтобы строка пережила повторный разбор шеллом
pub fn quote_cmd_line_argument(arg: &str) -> String {
    if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}
