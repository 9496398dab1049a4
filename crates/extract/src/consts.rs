// Archive layout
pub(crate) const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";
pub(crate) const MAVEN_PATH: &str = "META-INF/maven/";
pub(crate) const POM_FILE_NAME: &str = "pom.xml";
pub(crate) const LIB_PATHS: [&str; 2] = ["BOOT-INF/lib/", "WEB-INF/lib/"];
pub(crate) const LIB_EXTENSION: &str = ".jar";

// Manifest fields
pub(crate) const MAIN_CLASS_FIELD: &str = "Main-Class";
pub(crate) const APP_NAME_FIELD: &str = "Implementation-Title";
pub(crate) const VERSION_FIELD: &str = "Implementation-Version";
pub(crate) const JDK_VERSION_FIELD: &str = "Build-Jdk-Spec";
pub(crate) const JDK_VERSION_FIELD_1X: &str = "Build-Jdk";
pub(crate) const SPRING_BOOT_VERSION_FIELD: &str = "Spring-Boot-Version";

// Spring Boot launchers
pub(crate) const JAR_LAUNCHER_CLASS_NAME: &str = "org.springframework.boot.loader.JarLauncher";
pub(crate) const PROPERTIES_LAUNCHER_CLASS_NAME: &str = "org.springframework.boot.loader.PropertiesLauncher";

// Build descriptor
pub(crate) const SPRING_BOOT_STARTER_GROUP_ID: &str = "org.springframework.boot";
pub(crate) const SPRING_BOOT_STARTER_ARTIFACT_ID: &str = "spring-boot-starter-parent";
pub(crate) const SPRING_BOOT_JAR_FILE_PREFIX: &str = "spring-boot";
pub(crate) const JAVA_VERSION_PROPERTY: &str = "java.version";
pub(crate) const COMPILER_TARGET_PROPERTY: &str = "maven.compiler.target";
// Same key as the target property; kept as its own lookup step.
pub(crate) const COMPILER_RELEASE_PROPERTY: &str = "maven.compiler.target";

// Application configuration keys
pub(crate) const APPLICATION_NAME_KEY: &str = "spring.application.name";
pub(crate) const APPLICATION_PORT_KEY: &str = "server.port";
pub(crate) const DEFAULT_PORT: u16 = 8080;
