//! Probe orderings, one chain per derived fact.
//!
//! Sources are ranked by authority: explicit runtime override, then the
//! bundled build descriptor, the manifest, bundled configuration files, file
//! name heuristics, and finally hard-coded defaults. Every probe swallows its
//! own lookup failures and simply reports "not found".

use crate::classify::{base_name, stem};
use crate::consts;
use crate::jar::JarFile;
use crate::lookup;
use crate::models::AppType;
use crate::probe::ProbeChain;
use crate::process::ProcessOptions;

/// Packaging type: manifest main class, starter parent, bundled Spring Boot libraries.
pub fn app_type_chain() -> ProbeChain<'static, JarFile, AppType> {
    ProbeChain::new("app_type")
        .probe("manifest main class", app_type_from_manifest)
        .probe("build descriptor parent", app_type_from_descriptor)
        .probe("dependencies", app_type_from_dependencies)
}

/// Artifact name: descriptor name, manifest title, archive file name.
pub fn artifact_name_chain() -> ProbeChain<'static, JarFile, String> {
    ProbeChain::new("artifact_name")
        .probe("build descriptor name", artifact_name_from_descriptor)
        .probe("manifest title", artifact_name_from_manifest)
        .probe("file name", artifact_name_from_location)
}

/// Running application name: `-D` option, properties files, YAML files.
pub fn app_name_chain(process: &dyn ProcessOptions) -> ProbeChain<'_, JarFile, String> {
    ProbeChain::new("app_name")
        .probe("process options", move |_: &JarFile| app_name_from_options(process))
        .probe("properties config", app_name_from_properties)
        .probe("yaml config", app_name_from_yaml)
}

/// Running application port: `--`/`-D` option, YAML files, properties files, 8080.
pub fn app_port_chain(process: &dyn ProcessOptions) -> ProbeChain<'_, JarFile, u16> {
    ProbeChain::new("app_port")
        .probe("process options", move |_: &JarFile| app_port_from_options(process))
        .probe("yaml config", app_port_from_yaml)
        .probe("properties config", app_port_from_properties)
        .probe("default", |_| Some(consts::DEFAULT_PORT))
}

/// Build JDK version: descriptor properties, then the current and legacy manifest fields.
pub fn build_jdk_version_chain() -> ProbeChain<'static, JarFile, String> {
    ProbeChain::new("build_jdk_version")
        .probe("build descriptor properties", jdk_version_from_descriptor)
        .probe("manifest jdk spec", |jar: &JarFile| manifest_field(jar, consts::JDK_VERSION_FIELD))
        .probe("manifest jdk", |jar: &JarFile| manifest_field(jar, consts::JDK_VERSION_FIELD_1X))
}

/// Spring Boot version: starter parent version, then the manifest.
pub fn spring_boot_version_chain() -> ProbeChain<'static, JarFile, String> {
    ProbeChain::new("spring_boot_version")
        .probe("build descriptor parent", spring_boot_version_from_descriptor)
        .probe("manifest", |jar: &JarFile| manifest_field(jar, consts::SPRING_BOOT_VERSION_FIELD))
}

/// Application version: descriptor version, then the manifest.
pub fn version_chain() -> ProbeChain<'static, JarFile, String> {
    ProbeChain::new("version")
        .probe("build descriptor version", |jar: &JarFile| {
            jar.build_descriptor().map(|project| project.coordinates.version.trim()).and_then(non_empty)
        })
        .probe("manifest", |jar: &JarFile| manifest_field(jar, consts::VERSION_FIELD))
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn manifest_field(jar: &JarFile, field: &str) -> Option<String> {
    jar.manifest().non_empty(field).map(str::to_string)
}

fn is_starter_parent(jar: &JarFile) -> bool {
    jar.build_descriptor()
        .and_then(|project| project.parent.as_ref())
        .is_some_and(|parent| parent.is(consts::SPRING_BOOT_STARTER_GROUP_ID, consts::SPRING_BOOT_STARTER_ARTIFACT_ID))
}

fn app_type_from_manifest(jar: &JarFile) -> Option<AppType> {
    match jar.manifest().get(consts::MAIN_CLASS_FIELD)? {
        // Inconclusive: defer to the descriptor and dependency probes.
        consts::JAR_LAUNCHER_CLASS_NAME => None,
        consts::PROPERTIES_LAUNCHER_CLASS_NAME => Some(AppType::SpringBootFatJar),
        _ => Some(AppType::ExecutableJar),
    }
}

fn app_type_from_descriptor(jar: &JarFile) -> Option<AppType> {
    is_starter_parent(jar).then_some(AppType::SpringBootFatJar)
}

fn app_type_from_dependencies(jar: &JarFile) -> Option<AppType> {
    jar.dependencies()
        .iter()
        .any(|lib| lib.contains(consts::SPRING_BOOT_JAR_FILE_PREFIX))
        .then_some(AppType::SpringBootFatJar)
}

fn artifact_name_from_descriptor(jar: &JarFile) -> Option<String> {
    jar.build_descriptor().and_then(|project| project.name.as_deref()).and_then(non_empty)
}

fn artifact_name_from_manifest(jar: &JarFile) -> Option<String> {
    manifest_field(jar, consts::APP_NAME_FIELD)
}

fn artifact_name_from_location(jar: &JarFile) -> Option<String> {
    let location = jar.location().trim_end_matches(['/', '\\']);
    let file_name = base_name(location);
    let file_name = file_name.rsplit('\\').next().unwrap_or(file_name);
    Some(stem(file_name).to_string())
}

/// Value of the first flag present among the process options.
fn option_value(process: &dyn ProcessOptions, flags: &[&str]) -> Option<String> {
    let options = match process.jvm_options() {
        Ok(options) => options,
        Err(err) => {
            tracing::debug!(error = %err, "ignoring process options");
            return None;
        },
    };
    let parsed = lookup::parse_properties(&options.join("\n"));
    flags.iter().find_map(|flag| parsed.get(*flag)).and_then(|value| non_empty(value))
}

fn app_name_from_options(process: &dyn ProcessOptions) -> Option<String> {
    let flag = format!("-D{}", consts::APPLICATION_NAME_KEY);
    option_value(process, &[flag.as_str()])
}

fn app_name_from_properties(jar: &JarFile) -> Option<String> {
    jar.application_configurations()
        .iter()
        .filter(|file| file.is_properties())
        .find_map(|file| lookup::properties_string(consts::APPLICATION_NAME_KEY, &file.content).and_then(|v| non_empty(&v)))
}

fn app_name_from_yaml(jar: &JarFile) -> Option<String> {
    jar.application_configurations()
        .iter()
        .filter(|file| file.is_yaml())
        .find_map(|file| lookup::yaml_string(consts::APPLICATION_NAME_KEY, &file.content).and_then(|v| non_empty(&v)))
}

fn parse_port(value: &str) -> Option<u16> {
    value.trim().parse::<u16>().ok()
}

fn app_port_from_options(process: &dyn ProcessOptions) -> Option<u16> {
    let flags = [format!("--{}", consts::APPLICATION_PORT_KEY), format!("-D{}", consts::APPLICATION_PORT_KEY)];
    option_value(process, &[flags[0].as_str(), flags[1].as_str()]).as_deref().and_then(parse_port)
}

fn app_port_from_yaml(jar: &JarFile) -> Option<u16> {
    jar.application_configurations().iter().filter(|file| file.is_yaml()).find_map(|file| {
        match lookup::yaml_integer(consts::APPLICATION_PORT_KEY, &file.content) {
            Some(port) => u16::try_from(port).ok(),
            None => lookup::yaml_string(consts::APPLICATION_PORT_KEY, &file.content).as_deref().and_then(parse_port),
        }
    })
}

fn app_port_from_properties(jar: &JarFile) -> Option<u16> {
    jar.application_configurations()
        .iter()
        .filter(|file| file.is_properties())
        .find_map(|file| lookup::properties_string(consts::APPLICATION_PORT_KEY, &file.content).as_deref().and_then(parse_port))
}

fn jdk_version_from_descriptor(jar: &JarFile) -> Option<String> {
    let project = jar.build_descriptor()?;
    [consts::JAVA_VERSION_PROPERTY, consts::COMPILER_RELEASE_PROPERTY, consts::COMPILER_TARGET_PROPERTY]
        .into_iter()
        .find_map(|key| project.property(key))
        .and_then(non_empty)
}

fn spring_boot_version_from_descriptor(jar: &JarFile) -> Option<String> {
    if !is_starter_parent(jar) {
        return None;
    }
    jar.build_descriptor()?.parent.as_ref().and_then(|parent| non_empty(&parent.version))
}
