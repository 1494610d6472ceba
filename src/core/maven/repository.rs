use serde::{Deserialize, Serialize};

use super::artifact::{group_matches, MavenArtifact};

/// A Maven repository the resolved coordinates may be fetched from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MavenRepository {
    pub name: String,
    pub url: String,
    /// Restrict the repository to these groups and their sub-groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
}

impl MavenRepository {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            groups: None,
        }
    }

    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = Some(groups);
        self
    }

    /// Whether a coordinate (`group:name:version...`) may be served by this
    /// repository.
    pub fn includes(&self, coordinate: &str) -> bool {
        let group = coordinate.split(':').next().unwrap_or_default();
        match &self.groups {
            None => true,
            Some(groups) => groups.iter().any(|g| group_matches(group, g)),
        }
    }

    pub fn includes_artifact(&self, artifact: &MavenArtifact) -> bool {
        self.includes(&artifact.to_string())
    }
}

/// First repository allowed to serve `coordinate`, in declaration order.
pub fn repository_for<'a>(
    repositories: &'a [MavenRepository],
    coordinate: &str,
) -> Option<&'a MavenRepository> {
    repositories.iter().find(|repo| repo.includes(coordinate))
}

/// Extra dependencies declared next to the server libraries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalDependencies {
    #[serde(default)]
    pub compile_only: Option<Vec<MavenArtifact>>,
    #[serde(default)]
    pub implementation: Option<Vec<MavenArtifact>>,
}

impl AdditionalDependencies {
    pub fn compile_only_coordinates(&self) -> Vec<String> {
        to_coordinates(self.compile_only.as_deref())
    }

    pub fn implementation_coordinates(&self) -> Vec<String> {
        to_coordinates(self.implementation.as_deref())
    }
}

fn to_coordinates(artifacts: Option<&[MavenArtifact]>) -> Vec<String> {
    artifacts
        .unwrap_or_default()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_repository_includes_everything() {
        let repo = MavenRepository::new("mojang", "https://libraries.minecraft.net");
        assert!(repo.includes("com.mojang:brigadier:1.1.8"));
        assert!(repo.includes("org.slf4j:slf4j-api:2.0.7"));
    }

    #[test]
    fn group_filter_covers_sub_groups_only() {
        let repo = MavenRepository::new("paper", "https://repo.papermc.io/repository/maven-public/")
            .with_groups(vec!["io.papermc".into(), "net.md-5".into()]);

        assert!(repo.includes("io.papermc:paperclip:3.0.3"));
        assert!(repo.includes("io.papermc.paper:paper-api:1.20.1-R0.1-SNAPSHOT"));
        assert!(repo.includes("net.md-5:bungeecord-chat:1.20-R0.1"));
        assert!(!repo.includes("io.papermcx:other:1.0"));
        assert!(!repo.includes("com.mojang:brigadier:1.1.8"));
    }

    #[test]
    fn first_matching_repository_serves_a_coordinate() {
        let repos = vec![
            MavenRepository::new("paper", "https://repo.papermc.io/repository/maven-public/")
                .with_groups(vec!["io.papermc".into()]),
            MavenRepository::new("minecraft", "https://libraries.minecraft.net")
                .with_groups(vec!["com.mojang".into()]),
        ];

        let served = |c: &str| repository_for(&repos, c).map(|r| r.name.as_str());
        assert_eq!(served("io.papermc.paper:paper-api:1.20.1"), Some("paper"));
        assert_eq!(served("com.mojang:brigadier:1.1.8"), Some("minecraft"));
        assert_eq!(served("org.slf4j:slf4j-api:2.0.7"), None);

        let artifact = MavenArtifact::parse("com.mojang:datafixerupper:6.0.8").unwrap();
        assert!(repos[1].includes_artifact(&artifact));
        assert!(!repos[0].includes_artifact(&artifact));
    }

    #[test]
    fn additional_dependencies_render_as_coordinates() {
        let deps: AdditionalDependencies = serde_json::from_str(
            r#"{
                "compileOnly": [
                    {"group": "org.jetbrains", "name": "annotations", "version": "24.0.1"}
                ],
                "implementation": [
                    {"group": "org.lwjgl", "name": "lwjgl", "version": "3.3.3",
                     "classifier": "natives-linux", "extension": "jar"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            deps.compile_only_coordinates(),
            vec!["org.jetbrains:annotations:24.0.1"]
        );
        assert_eq!(
            deps.implementation_coordinates(),
            vec!["org.lwjgl:lwjgl:3.3.3:natives-linux@jar"]
        );
        assert!(AdditionalDependencies::default()
            .compile_only_coordinates()
            .is_empty());
    }
}
