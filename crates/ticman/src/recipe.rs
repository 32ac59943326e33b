//! The build recipe: every command the installer can run, as data.
//!
//! The built-in recipe builds TIC-80 with the Pro feature set on Fedora. A
//! TOML file may override any subset of fields; missing fields keep their
//! built-in value. All shell command lines are composed in this module and
//! nowhere else.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::plan::{Operation, Step, StepPlanner};

/// Checks out a fixed revision of a vendored sub-repository after cloning.
/// Each pin adds one step between cloning and configuring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePin {
    pub description: String,
    /// Path of the sub-repository, relative to the checkout.
    pub path: String,
    /// Tag or commit to check out.
    pub revision: String,
}

/// A file the install step puts on the system, removed by uninstall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledFile {
    pub description: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Recipe {
    /// Product name, used in the title and menu.
    pub product: String,
    /// Platform label shown next to the version.
    pub platform: String,
    /// Scratch directory for the build. Removed before and after building.
    pub build_dir: String,
    pub repository: String,
    /// Directory name of the clone inside `build_dir`.
    pub checkout: String,
    pub cmake_flags: Vec<String>,
    /// Sub-repository revisions to check out after cloning. Empty for none.
    pub pins: Vec<SourcePin>,
    /// Package installation steps, run first.
    pub dependencies: Vec<Step>,
    pub installed: Vec<InstalledFile>,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            product: "TIC-80 Pro".to_string(),
            platform: "fedora".to_string(),
            // /var/tmp rather than /tmp: the build outgrows a tmpfs.
            build_dir: "/var/tmp/tic80-build".to_string(),
            repository: "https://github.com/nesbox/TIC-80.git".to_string(),
            checkout: "TIC-80".to_string(),
            cmake_flags: [
                "-DCMAKE_C_FLAGS=\"-DTIC80_PRO\"",
                "-DCMAKE_CXX_FLAGS=\"-DTIC80_PRO\"",
                "-DBUILD_PRO=On",
                "-DBUILD_WITH_ALL=On",
                "-DBUILD_SDL=On",
                "-DBUILD_SDLGPU=On",
                "-DBUILD_STATIC=On",
            ]
            .map(String::from)
            .to_vec(),
            pins: vec![SourcePin {
                description: "Patching SDL2...".to_string(),
                path: "vendor/sdl2".to_string(),
                revision: "release-2.32.8".to_string(),
            }],
            dependencies: vec![
                Step::new(
                    "Installing Group Tools...",
                    "dnf -y install @development-tools",
                ),
                Step::new(
                    "Installing Deps (GLU/Curl/X11)...",
                    "dnf -y install gcc gcc-c++ cmake ruby rubygem-rake libglvnd-devel \
                     libglvnd-gles freeglut-devel alsa-lib-devel git libX11-devel libXext-devel \
                     libXcursor-devel libXi-devel libXrandr-devel mesa-libGLU-devel curl",
                ),
            ],
            installed: vec![
                InstalledFile {
                    description: "Removing Binary...".to_string(),
                    path: "/usr/local/bin/tic80".to_string(),
                },
                InstalledFile {
                    description: "Removing Desktop...".to_string(),
                    path: "/usr/local/share/applications/tic80.desktop".to_string(),
                },
                InstalledFile {
                    description: "Removing Icon...".to_string(),
                    path: "/usr/local/share/icons/hicolor/scalable/apps/tic80.svg".to_string(),
                },
            ],
        }
    }
}

impl Recipe {
    /// Load a recipe from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ReadRecipe {
            path: path.to_path_buf(),
            source,
        })?;
        let recipe: Recipe = toml::from_str(&text).map_err(|source| Error::ParseRecipe {
            path: path.to_path_buf(),
            source,
        })?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// The recipe as TOML, suitable as a starting point for a custom file.
    pub fn to_toml(&self) -> Result<String, Error> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the paths that end up unquoted in `rm -rf` and `cd` commands.
    ///
    /// `build_dir` must be absolute, at least two levels deep, and made of
    /// plain path characters only, so no glob, whitespace or shell syntax can
    /// widen what cleanup removes. `checkout` must be one such path component.
    /// Dependency and pin commands are operator-authored shell and are not
    /// checked.
    pub fn validate(&self) -> Result<(), Error> {
        let components: Vec<&str> = self
            .build_dir
            .split('/')
            .filter(|part| !part.is_empty())
            .collect();
        let plain = self.build_dir.starts_with('/')
            && self.build_dir.chars().all(is_path_char)
            && components.iter().all(|part| is_component(part));
        if !plain || components.len() < 2 {
            return Err(Error::InvalidRecipe(format!(
                "build_dir must be an absolute path at least two levels below / \
                 using only letters, digits, `.`, `_` and `-`, got `{}`",
                self.build_dir
            )));
        }
        if self.product.trim().is_empty() {
            return Err(Error::InvalidRecipe("product must not be empty".to_string()));
        }
        if !is_component(&self.checkout) || !self.checkout.chars().all(is_path_char) {
            return Err(Error::InvalidRecipe(format!(
                "checkout must be a single plain directory name, got `{}`",
                self.checkout
            )));
        }
        Ok(())
    }

    fn source_dir(&self) -> String {
        format!("{}/{}", self.build_dir, self.checkout)
    }

    fn build_steps(&self) -> Vec<Step> {
        let build_dir = &self.build_dir;
        let src = self.source_dir();
        let flags = self.cmake_flags.join(" ");

        let mut steps = self.dependencies.clone();
        steps.push(Step::new(
            "Cleaning previous builds...",
            format!("rm -rf {build_dir}"),
        ));
        steps.push(Step::new(
            "Creating build directory...",
            format!("mkdir -p {build_dir}"),
        ));
        steps.push(Step::new(
            "Cloning Repository...",
            format!("git clone --recursive {} {src}", self.repository),
        ));
        for pin in &self.pins {
            steps.push(Step::new(
                pin.description.clone(),
                format!(
                    "cd {src}/{} && git fetch --tags && git checkout {}",
                    pin.path, pin.revision
                ),
            ));
        }
        steps.push(Step::new(
            "Configuring CMake (Forcing Pro)...",
            format!("mkdir -p {src}/build && cd {src}/build && cmake {flags} .."),
        ));
        steps.push(Step::new(
            "Compiling...",
            format!("cd {src}/build && make -j$(nproc)"),
        ));
        steps.push(Step::new(
            "Installing...",
            format!("cd {src}/build && make install"),
        ));
        steps.push(Step::new("Cleaning up...", format!("rm -rf {build_dir}")));
        steps
    }

    fn removal_steps(&self) -> Vec<Step> {
        self.installed
            .iter()
            .map(|file| Step::new(file.description.clone(), format!("rm -f {}", file.path)))
            .collect()
    }
}

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-')
}

fn is_component(part: &str) -> bool {
    !part.is_empty() && part != "." && part != ".." && !part.contains('/')
}

impl StepPlanner for Recipe {
    fn plan(&self, operation: Operation) -> Vec<Step> {
        match operation {
            // Upgrading is a full rebuild over the existing install.
            Operation::Install | Operation::Upgrade => self.build_steps(),
            Operation::Uninstall => self.removal_steps(),
            Operation::Exit => Vec::new(),
        }
    }

    fn label(&self, operation: Operation) -> String {
        match operation {
            Operation::Install => format!("Install {}", self.product),
            Operation::Upgrade => "Upgrade (Rebuild)".to_string(),
            Operation::Uninstall => "Uninstall".to_string(),
            Operation::Exit => "Exit".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn descriptions(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|s| s.description.as_str()).collect()
    }

    #[test]
    fn install_follows_the_build_workflow() {
        let steps = Recipe::default().plan(Operation::Install);
        assert_eq!(
            descriptions(&steps),
            vec![
                "Installing Group Tools...",
                "Installing Deps (GLU/Curl/X11)...",
                "Cleaning previous builds...",
                "Creating build directory...",
                "Cloning Repository...",
                "Patching SDL2...",
                "Configuring CMake (Forcing Pro)...",
                "Compiling...",
                "Installing...",
                "Cleaning up...",
            ]
        );
        assert_eq!(steps[0].command, "dnf -y install @development-tools");
        assert_eq!(
            steps[4].command,
            "git clone --recursive https://github.com/nesbox/TIC-80.git /var/tmp/tic80-build/TIC-80"
        );
        assert!(steps[6].command.contains("-DBUILD_PRO=On"));
        assert!(steps[6].command.contains("-DCMAKE_C_FLAGS=\"-DTIC80_PRO\""));
        assert_eq!(steps[9].command, "rm -rf /var/tmp/tic80-build");
    }

    #[test]
    fn upgrade_is_the_same_plan_as_install() {
        let recipe = Recipe::default();
        assert_eq!(recipe.plan(Operation::Upgrade), recipe.plan(Operation::Install));
    }

    #[test]
    fn plans_are_deterministic() {
        let recipe = Recipe::default();
        for op in Operation::MENU {
            assert_eq!(recipe.plan(op), recipe.plan(op));
        }
    }

    #[test]
    fn uninstall_removes_each_installed_file() {
        let steps = Recipe::default().plan(Operation::Uninstall);
        assert_eq!(
            descriptions(&steps),
            vec!["Removing Binary...", "Removing Desktop...", "Removing Icon..."]
        );
        assert_eq!(steps[0].command, "rm -f /usr/local/bin/tic80");
    }

    #[test]
    fn exit_plans_nothing() {
        assert!(Recipe::default().plan(Operation::Exit).is_empty());
    }

    #[test]
    fn empty_pin_list_from_file_skips_the_patch_step() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pins = []").unwrap();

        let recipe = Recipe::load(file.path()).unwrap();
        assert!(recipe.pins.is_empty());
        let steps = recipe.plan(Operation::Install);
        assert_eq!(steps.len(), 9);
        assert!(!descriptions(&steps).contains(&"Patching SDL2..."));
    }

    #[test]
    fn printed_pinless_recipe_stays_pinless() {
        let recipe = Recipe {
            pins: Vec::new(),
            ..Recipe::default()
        };
        let parsed: Recipe = toml::from_str(&recipe.to_toml().unwrap()).unwrap();
        assert!(parsed.pins.is_empty());
        assert_eq!(parsed.plan(Operation::Install).len(), 9);
    }

    #[test]
    fn every_pin_gets_its_own_step() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[pins]]").unwrap();
        writeln!(file, "description = \"Pinning Lua...\"").unwrap();
        writeln!(file, "path = \"vendor/lua\"").unwrap();
        writeln!(file, "revision = \"v5.4.6\"").unwrap();

        let steps = Recipe::load(file.path()).unwrap().plan(Operation::Install);
        assert_eq!(steps[5].description, "Pinning Lua...");
        assert_eq!(
            steps[5].command,
            "cd /var/tmp/tic80-build/TIC-80/vendor/lua && git fetch --tags && git checkout v5.4.6"
        );
        assert_eq!(steps[6].description, "Configuring CMake (Forcing Pro)...");
    }

    #[test]
    fn menu_labels_use_the_product_name() {
        let recipe = Recipe::default();
        let labels: Vec<_> = Operation::MENU.iter().map(|op| recipe.label(*op)).collect();
        assert_eq!(
            labels,
            vec!["Install TIC-80 Pro", "Upgrade (Rebuild)", "Uninstall", "Exit"]
        );
    }

    #[test]
    fn validate_rejects_build_dirs_that_widen_cleanup() {
        for bad in [
            "/",
            "",
            "build",
            "//",
            "/usr",
            "/*",
            "/var/tmp/*",
            "/var/tmp/my build",
            "/var/tmp/x;rm",
            "/var/tmp/$HOME",
            "/var/..",
            "/var/tmp/~",
        ] {
            let recipe = Recipe {
                build_dir: bad.to_string(),
                ..Recipe::default()
            };
            assert!(
                matches!(recipe.validate(), Err(Error::InvalidRecipe(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(Recipe::default().validate().is_ok());
        let nested = Recipe {
            build_dir: "/opt/build/".to_string(),
            ..Recipe::default()
        };
        assert!(nested.validate().is_ok());
    }

    #[test]
    fn validate_rejects_checkouts_outside_build_dir() {
        for bad in ["", ".", "..", "a/b", "TIC 80", "*"] {
            let recipe = Recipe {
                checkout: bad.to_string(),
                ..Recipe::default()
            };
            assert!(recipe.validate().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "product = \"TIC-80\"").unwrap();
        writeln!(file, "build_dir = \"/opt/build\"").unwrap();

        let recipe = Recipe::load(file.path()).unwrap();
        assert_eq!(recipe.product, "TIC-80");
        assert_eq!(recipe.build_dir, "/opt/build");
        assert_eq!(recipe.repository, Recipe::default().repository);
        assert_eq!(recipe.plan(Operation::Install)[2].command, "rm -rf /opt/build");
    }

    #[test]
    fn unknown_fields_are_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prodcut = \"typo\"").unwrap();
        assert!(matches!(
            Recipe::load(file.path()),
            Err(Error::ParseRecipe { .. })
        ));
    }

    #[test]
    fn printed_recipe_loads_back_unchanged() {
        let text = Recipe::default().to_toml().unwrap();
        let parsed: Recipe = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Recipe::default());
    }
}
