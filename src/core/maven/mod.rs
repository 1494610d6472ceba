mod artifact;
mod repository;

pub use artifact::{group_matches, MavenArtifact};
pub use repository::{repository_for, AdditionalDependencies, MavenRepository};

/// Well-known Maven repositories used by the Minecraft ecosystem.
pub const MOJANG_LIBRARIES: &str = "https://libraries.minecraft.net";
pub const MAVEN_CENTRAL: &str = "https://repo1.maven.org/maven2";

/// Repositories every server library can be found in.
pub fn default_repositories() -> Vec<MavenRepository> {
    vec![
        MavenRepository::new("minecraft", MOJANG_LIBRARIES),
        MavenRepository::new("mavenCentral", MAVEN_CENTRAL),
    ]
}
