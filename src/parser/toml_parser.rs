// Copyright (c) 2025 Jetgen
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use serde::Deserialize;
use toml::Value;
use walkdir::WalkDir;
use std::fs;
use std::path::{Path, PathBuf};

use crate::toolchain::TargetOs;
use crate::warn;

/// Тип приложения. Закрытое перечисление, каждый генератор обязан обработать
/// все варианты, поэтому везде используется исчерпывающий match без заглушек
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppType {
    #[default]
    Plain,
    DynamicLibrary,
    WindowsService,
    WebApp,
}

/// Политика инлайн разворачивания методов. Числовые пресеты лимитов зашиты
/// в генератор аргументов, aggressive это значения компилятора по умолчанию
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InlineExpansion {
    TinyMethodsOnly,
    Low,
    Medium,
    #[default]
    Aggressive,
    VeryAggressive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StackTraceSupport {
    #[default]
    Minimal,
    Full,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizationType {
    All,
    AutoDetect,
}

impl OptimizationType {
    pub fn jet_value(self) -> &'static str {
        match self {
            OptimizationType::All => "all",
            OptimizationType::AutoDetect => "autodetect",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtectionType {
    All,
    NotRequired,
}

impl ProtectionType {
    pub fn jet_value(self) -> &'static str {
        match self {
            ProtectionType::All => "all",
            ProtectionType::NotRequired => "nomatter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackType {
    None,
    AutoDetect,
    All,
}

impl PackType {
    pub fn jet_value(self) -> &'static str {
        match self {
            PackType::None => "none",
            PackType::AutoDetect => "autodetect",
            PackType::All => "all",
        }
    }
}

/// Итоговое представление конфига проекта. Всё что попадает в prj файл и
/// аргументы компилятора берётся отсюда, после загрузки структура больше
/// не меняется
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    // Основная информация про приложение
    #[serde(default)]
    pub package: PackageInfo,

    // Настройки оптимизаций и защиты для компилятора
    #[serde(default)]
    pub compiler: CompilerInfo,

    // Рантайм и jvm аргументы
    #[serde(default)]
    pub runtime: RuntimeInfo,

    // Пробная версия с датой истечения
    pub trial: Option<TrialInfo>,

    // Windows ресурс с информацией о версии
    pub version_info: Option<VersionInfo>,

    // Куда класть отладочные символы
    #[serde(default)]
    pub pdb: PdbInfo,

    // Имя сервиса для windows-service
    pub service: Option<ServiceInfo>,

    // Развёртывание веб приложения
    pub webapp: Option<WebAppInfo>,

    // Профили исполнения (стартовый, usage, pgo)
    #[serde(default)]
    pub profile: ProfileInfo,

    // Какой тулчейн и что он умеет
    #[serde(default)]
    pub toolchain: ToolchainInfo,

    // Элементы classpath, каждый превращается в свой блок prj файла
    #[serde(default)]
    pub classpath: Vec<ClasspathEntry>,

    #[serde(skip)]
    pub base_path: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PackageInfo {
    #[serde(default)]
    pub app_type: AppType,
    pub main_class: Option<String>,
    #[serde(default)]
    pub output_name: String,
    pub splash: Option<PathBuf>,
    pub icon: Option<PathBuf>,
    #[serde(default)]
    pub hide_console: bool,

    // Аргументы которые будут передаваться собранному приложению при запуске
    #[serde(default)]
    pub run_args: Vec<String>,

    // Каталог с jar файлами, каждый найденный jar добавляется в classpath
    pub libs_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CompilerInfo {
    // Сырые опции компилятора, попадают в prj файл как есть
    #[serde(default)]
    pub options: Vec<String>,

    #[serde(default)]
    pub inline_expansion: InlineExpansion,

    #[serde(default = "default_true")]
    pub stack_allocation: bool,

    #[serde(default)]
    pub stack_trace_support: StackTraceSupport,

    #[serde(default)]
    pub multi_app: bool,

    #[serde(default)]
    pub global_optimizer: bool,

    #[serde(default)]
    pub protect_data: bool,

    // Зерно шифрования строк, обязательно при protect-data
    pub crypt_seed: Option<String>,
}

impl Default for CompilerInfo {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            inline_expansion: InlineExpansion::default(),
            stack_allocation: true,
            stack_trace_support: StackTraceSupport::default(),
            multi_app: false,
            global_optimizer: false,
            protect_data: false,
            crypt_seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeInfo {
    pub flavor: Option<String>,
    #[serde(default)]
    pub jvm_args: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct TrialInfo {
    pub expire_in_days: Option<u32>,

    // Дата в формате ddMMMyyyy, например 15Sep2026
    pub expire_date: Option<String>,

    #[serde(default)]
    pub expire_message: String,
}

impl TrialInfo {
    /// Значение для -expire: либо дата, либо количество дней. Загрузчик
    /// следит чтобы было задано ровно одно из двух
    pub fn expire(&self) -> String {
        match (&self.expire_date, self.expire_in_days) {
            (Some(date), _) => date.clone(),
            (None, Some(days)) => days.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct VersionInfo {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub copyright: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PdbInfo {
    // Если true, отладочные символы остаются в каталоге сборки и
    // -pdblocation не пишется вообще
    #[serde(default = "default_true")]
    pub keep_in_build_dir: bool,

    pub location: Option<PathBuf>,
}

impl Default for PdbInfo {
    fn default() -> Self {
        Self {
            keep_in_build_dir: true,
            location: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServiceInfo {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebAppInfo {
    // Имя war архива под которым приложение разворачивается в контейнере
    pub deploy_name: String,

    #[serde(default)]
    pub hide_config: bool,

    #[serde(default = "default_true")]
    pub gen_scripts: bool,
}

impl WebAppInfo {
    /// Имя развёртывания без расширения архива, используется как имя
    /// виртуального каталога в classloader записях
    pub fn deploy_base(&self) -> &str {
        self.deploy_name.strip_suffix(".war").unwrap_or(&self.deploy_name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProfileInfo {
    // Где лежат файлы профилей, по умолчанию каталог проекта
    pub dir: Option<PathBuf>,

    // Базовое имя файлов профилей, по умолчанию output-name
    pub name: Option<String>,

    // Собирать стартовый профиль при каждом запуске приложения
    #[serde(default)]
    pub startup: bool,

    #[serde(default = "default_startup_timeout")]
    pub startup_timeout: u32,

    // true если профилирование запускается на этой же машине, тогда в
    // jvm аргументы попадает абсолютный путь профиля, иначе только имя
    #[serde(default = "default_true")]
    pub locally: bool,
}

impl Default for ProfileInfo {
    fn default() -> Self {
        Self {
            dir: None,
            name: None,
            startup: false,
            startup_timeout: default_startup_timeout(),
            locally: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainInfo {
    // Целевая платформа, по умолчанию платформа на которой запущен jetgen
    pub target_os: Option<TargetOs>,

    #[serde(default = "default_true")]
    pub startup_profile_generation: bool,

    #[serde(default = "default_true")]
    pub pgo: bool,
}

impl Default for ToolchainInfo {
    fn default() -> Self {
        Self {
            target_os: None,
            startup_profile_generation: true,
            pgo: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClasspathEntry {
    pub path: PathBuf,

    // true для основного артефакта сборки, false для библиотек
    #[serde(default)]
    pub main: bool,

    pub optimize: Option<OptimizationType>,
    pub protect: Option<ProtectionType>,
    pub pack: Option<PackType>,
}

/// Пути к трём файлам профилей исполнения. Каждый либо существует на диске
/// либо нет, генераторы проверяют это сами в момент генерации
#[derive(Debug)]
pub struct ExecProfiles {
    pub usg: PathBuf,
    pub startup: PathBuf,
    pub jprofile: PathBuf,
}

impl Config {
    pub fn build_dir(&self) -> PathBuf {
        self.base_path.join(".jetgen").join("build")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.base_path.join(".jetgen").join("cache")
    }

    /// Относительные пути в конфиге считаются от каталога проекта
    pub fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    pub fn main_class(&self) -> &str {
        self.package.main_class.as_deref().unwrap_or_default()
    }

    /// Путь элемента classpath для prj файла. Зависимости раскладываются в
    /// каталог сборки, поэтому если путь лежит под ним то пишется относительная
    /// часть, иначе остаётся только имя файла
    pub fn path_relative_to_build_dir(&self, path: &Path) -> PathBuf {
        let absolute = self.absolute(path);

        match absolute.strip_prefix(self.build_dir()) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => absolute
                .file_name()
                .map(PathBuf::from)
                .unwrap_or(absolute),
        }
    }

    /// Каталог в который компилятор кладёт домашнюю папку контейнера
    pub fn webapp_in_build_dir(&self) -> PathBuf {
        self.build_dir().join("tomcat")
    }

    pub fn exec_profiles(&self) -> ExecProfiles {
        let dir = match &self.profile.dir {
            Some(dir) => self.absolute(dir),
            None => self.base_path.clone(),
        };

        let name = self
            .profile
            .name
            .clone()
            .unwrap_or_else(|| self.package.output_name.clone());

        ExecProfiles {
            usg: dir.join(format!("{}.usg", name)),
            startup: dir.join(format!("{}.startup", name)),
            jprofile: dir.join(format!("{}.jprofile", name)),
        }
    }

    /// Куда складывать отладочные символы когда они не остаются в каталоге
    /// сборки. Если место не задано явно, используется глобальный каталог
    /// в домашней папке, общий для всех проектов jetgen
    pub fn pdb_location(&self) -> PathBuf {
        match &self.pdb.location {
            Some(location) => self.absolute(location),
            None => {
                let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
                home.join(".jetgen").join("pdb").join(&self.package.output_name)
            }
        }
    }
}

/// Функция для парсинга toml конфига. Jetgen поддерживает несколько путей,
/// поэтому передаётся не путь к 1 файлу, а вектор из путей к файлам. Файлы
/// сливаются таблица к таблице, более поздние перекрывают более ранние
pub fn load_configs(paths: Vec<String>) -> Result<Config, Box<dyn std::error::Error>> {
    if paths.is_empty() {
        return Err("No toml file provided".into());
    }

    let first_toml = PathBuf::from(&paths[0]);
    let base_dir = first_toml
        .parent()
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let mut merged_value = Value::Table(toml::map::Map::new());

    // Чтение каждого файла в векторе путей, превращение в toml представление и слияние
    for path in &paths {
        let path_ref = Path::new(path);
        let content = fs::read_to_string(path_ref)
            .map_err(|e| format!("File read error {:?}: {}", path_ref, e))?;

        let value: Value = toml::from_str(&content)
            .map_err(|e| format!("Toml syntax error {:?}: {}", path_ref, e))?;

        merge_toml_values(&mut merged_value, value);
    }

    let mut config: Config = merged_value
        .try_into()
        .map_err(|e| format!("Config structure error: {}", e))?;

    config.base_path = base_dir;

    collect_libs(&mut config);

    Ok(config)
}

/// Эта функция нужна чтобы слить все toml конфиг файлы проекта в 1 представление
fn merge_toml_values(base: &mut Value, append: Value) {
    match (base, append) {
        (Value::Table(base_map), Value::Table(append_map)) => {
            for (k, v) in append_map {
                let base_entry = base_map.entry(k).or_insert(Value::Table(toml::map::Map::new()));
                merge_toml_values(base_entry, v);
            }
        }
        (base_val, append_val) => *base_val = append_val,
    }
}

/// Если в конфиге указан libs-dir, нужно пройтись по нему и добавить каждый
/// jar как зависимость classpath. Список сортируется чтобы порядок блоков
/// в prj файле не зависел от порядка обхода файловой системы
fn collect_libs(config: &mut Config) {
    let Some(libs_dir) = config.package.libs_dir.clone() else {
        return;
    };

    let dir = config.absolute(&libs_dir);
    if !dir.is_dir() {
        warn!("libs-dir {:?} does not exist, skipped", dir);
        return;
    }

    let mut jars = Vec::new();
    for entry in WalkDir::new(&dir).into_iter().filter_map(|e| e.ok()) {
        if entry.path().extension().map_or(false, |e| e == "jar") {
            jars.push(entry.path().to_path_buf());
        }
    }

    jars.sort();

    for jar in jars {
        config.classpath.push(ClasspathEntry {
            path: jar,
            main: false,
            optimize: None,
            protect: None,
            pack: None,
        });
    }
}

fn default_true() -> bool {
    true
}

fn default_startup_timeout() -> u32 {
    20
}
