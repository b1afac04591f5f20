// Copyright (c) 2025 Jetgen
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use jetgen::build_system::{Actions, BuildSystem};
use jetgen::frontend;
use jetgen::parser;
use jetgen::toolchain::Toolchain;
use jetgen::{fatal, info};

fn main() {
    let mut build_system = BuildSystem::new();
    let action = build_system.get_action();

    match action {
        Actions::Prj => run_generation(&mut build_system, false),
        Actions::Profile => run_generation(&mut build_system, true),

        Actions::Args => {
            let paths = get_paths(build_system.args.clone());
            if paths.is_empty() {
                build_system.print_help();
                fatal!("No toml file provided");
            }

            let config = match parser::load(paths) {
                Ok(config) => config,
                Err(e) => fatal!("{}", e),
            };

            let jet = Toolchain::from_config(&config);

            let mut args = frontend::compiler_args::compiler_args(&config, &jet, false);

            // Последняя строка это закомментированная копия -jetvmprop для
            // prj файла, в командной строке она передаётся без комментария
            args.pop();
            args.push(frontend::compiler_args::jetvm_prop_opt(&config, false));

            for arg in args {
                println!("{}", arg);
            }
        }

        Actions::Help => {
            build_system.print_help();
        }
    }
}

fn run_generation(build_system: &mut BuildSystem, build_to_profile: bool) {
    let paths = get_paths(build_system.args.clone());
    if paths.is_empty() {
        build_system.print_help();
        fatal!("No toml file provided");
    }

    match frontend::generate(paths, build_to_profile) {
        Ok(prj_path) => info!("Project file written to {}", prj_path.display()),
        Err(e) => fatal!("{}", e),
    }
}

fn get_paths(args: Vec<String>) -> Vec<String> {
    if args.len() >= 3 {
        return args[2..].to_vec();
    }

    vec![]
}
