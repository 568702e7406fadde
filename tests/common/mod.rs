//! Common test utilities for classloader-model integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Dependency graph with an application, one plugin and its library
#[allow(dead_code)]
pub const SIMPLE_GRAPH: &str = r#"{
  "artifacts": [
    {
      "coordinates": {"groupId": "org.acme", "artifactId": "orders", "version": "1.0.0"},
      "location": "orders/orders-1.0.0.jar",
      "packages": ["org.acme.orders"],
      "resources": ["flows/orders.xml"],
      "dependencies": [
        {"groupId": "org.acme", "artifactId": "commons", "version": "2.0.0"},
        {"groupId": "org.mule.connectors", "artifactId": "mule-http-connector", "version": "1.5.0", "classifier": "mule-plugin"}
      ]
    },
    {
      "coordinates": {"groupId": "org.acme", "artifactId": "commons", "version": "2.0.0"}
    },
    {
      "coordinates": {"groupId": "org.mule.connectors", "artifactId": "mule-http-connector", "version": "1.5.0", "classifier": "mule-plugin"},
      "packages": ["org.mule.http"],
      "dependencies": [
        {"groupId": "io.netty", "artifactId": "netty", "version": "4.1.0"}
      ]
    },
    {
      "coordinates": {"groupId": "io.netty", "artifactId": "netty", "version": "4.1.0"}
    },
    {
      "coordinates": {"groupId": "org.postgresql", "artifactId": "postgresql", "version": "42.7.0"}
    }
  ]
}"#;

/// Graph where a plain library drags in an undeclared plugin
#[allow(dead_code)]
pub const TRANSITIVE_PLUGIN_GRAPH: &str = r#"{
  "artifacts": [
    {
      "coordinates": {"groupId": "org.acme", "artifactId": "orders", "version": "1.0.0"},
      "dependencies": [
        {"groupId": "org.acme", "artifactId": "client", "version": "1.0.0"}
      ]
    },
    {
      "coordinates": {"groupId": "org.acme", "artifactId": "client", "version": "1.0.0"},
      "dependencies": [
        {"groupId": "org.acme", "artifactId": "inner", "version": "1.0.0", "classifier": "mule-plugin"}
      ]
    },
    {
      "coordinates": {"groupId": "org.acme", "artifactId": "inner", "version": "1.0.0", "classifier": "mule-plugin"}
    }
  ]
}"#;

/// Build descriptor adding a driver that only exists in the repository layout
#[allow(dead_code)]
pub const LAYOUT_ONLY_DEPENDENCY_BUILD: &str = r#"
plugins:
  - groupId: org.mule.tools.maven
    artifactId: mule-maven-plugin
    configuration:
      additionalPluginDependencies:
        - plugin:
            groupId: org.mule.connectors
            artifactId: mule-http-connector
            additionalDependencies:
              - dependency:
                  groupId: org.acme
                  artifactId: driver
                  version: 3.0.0
"#;

/// Build descriptor adding a JDBC driver to the HTTP connector
#[allow(dead_code)]
pub const ADDITIONAL_DEPENDENCIES_BUILD: &str = r#"
plugins:
  - groupId: org.mule.tools.maven
    artifactId: mule-maven-plugin
    configuration:
      additionalPluginDependencies:
        - plugin:
            groupId: org.mule.connectors
            artifactId: mule-http-connector
            additionalDependencies:
              - dependency:
                  groupId: org.postgresql
                  artifactId: postgresql
                  version: 42.7.0
"#;

pub const ORDERS: &str = "org.acme:orders:1.0.0";

/// A scratch directory holding the inputs and outputs of one run
#[allow(dead_code)]
pub struct TestProject {
    pub temp: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        std::fs::create_dir_all(temp.path().join("repository"))
            .expect("Failed to create repository directory");
        Self { temp }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn repository(&self) -> PathBuf {
        self.path().join("repository")
    }

    pub fn output(&self) -> PathBuf {
        self.path().join("out")
    }

    /// Write a file relative to the project root, returning its path
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn write_graph(&self, content: &str) -> PathBuf {
        self.write_file("graph.json", content)
    }

    pub fn write_build(&self, content: &str) -> PathBuf {
        self.write_file("build.yaml", content)
    }

    pub fn read_file(&self, path: &Path) -> String {
        std::fs::read_to_string(path).expect("Failed to read file")
    }
}

/// Command for the binary with logging quieted
pub fn classloader_model_cmd() -> Command {
    let mut cmd = Command::cargo_bin("classloader-model").expect("Failed to find binary");
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("CLASSLOADER_MODEL_REPOSITORY");
    cmd
}
