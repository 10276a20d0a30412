/// `javap` module loader
///
/// Enumerates the public members of the compiled class from
/// `javap -public -s` output, which lists each declaration followed by its
/// JVM descriptor:
///
/// ```text
/// public class UserCode {
///   public UserCode();
///     descriptor: ()V
///   public int square(int);
///     descriptor: (I)I
/// }
/// ```
use super::{CallableMember, CompiledArtifact, LoadedModule, ModuleLoader};
use crate::config::presets::JavaToolchain;
use crate::config::types::{ExecError, Result};
use crate::resolve::java_type::MethodDescriptor;
use crate::utils::output::OutputCollector;
use std::process::Command;

pub struct JavapLoader {
    toolchain: JavaToolchain,
    collector: OutputCollector,
}

impl JavapLoader {
    pub fn new(toolchain: JavaToolchain) -> Self {
        Self {
            toolchain,
            collector: OutputCollector::default(),
        }
    }
}

impl ModuleLoader for JavapLoader {
    fn load(&self, artifact: &CompiledArtifact) -> Result<LoadedModule> {
        let class = artifact.class_name.as_str();
        let mut command = Command::new(&self.toolchain.javap);
        command
            .arg("-public")
            .arg("-s")
            .arg("-classpath")
            .arg(&artifact.class_dir)
            .arg(class);

        let output = self
            .collector
            .run(&mut command)
            .map_err(|e| ExecError::load(class, format!("cannot run javap: {}", e)))?;
        if !output.success() {
            return Err(ExecError::load(
                class,
                format!(
                    "javap finished with {}: {}",
                    output.describe_status(),
                    output.stderr.text().trim_end()
                ),
            ));
        }

        let (has_default_constructor, members) = parse_members(class, &output.stdout.text())
            .map_err(|reason| ExecError::load(class, reason))?;
        log::info!(
            "Loaded {} with {} public method(s): {}",
            class,
            members.len(),
            members
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(LoadedModule {
            class_name: class.to_string(),
            class_dir: artifact.class_dir.clone(),
            has_default_constructor,
            members,
        })
    }
}

/// Parse `javap -public -s` output for `class`.
///
/// Returns whether a public no-argument constructor exists, and the methods in
/// declaration order. Fields and other constructors are skipped.
pub fn parse_members(
    class: &str,
    listing: &str,
) -> std::result::Result<(bool, Vec<CallableMember>), String> {
    let mut has_default_constructor = false;
    let mut members = Vec::new();
    let mut declaration: Option<&str> = None;
    let mut saw_class = false;

    for line in listing.lines() {
        let line = line.trim();
        if let Some(descriptor) = line.strip_prefix("descriptor:") {
            let Some(decl) = declaration.take() else {
                continue;
            };
            let descriptor = descriptor.trim();
            if !descriptor.starts_with('(') {
                continue;
            }
            let parsed = MethodDescriptor::parse(descriptor)?;
            let name = method_name(decl)
                .ok_or_else(|| format!("cannot find a method name in '{}'", decl))?;
            if name == class {
                if parsed.parameters.is_empty() {
                    has_default_constructor = true;
                }
                continue;
            }
            members.push(CallableMember {
                name: name.to_string(),
                parameter_types: parsed.parameters,
                return_type: parsed.return_type,
                is_static: decl.split_whitespace().any(|word| word == "static"),
            });
        } else if line.ends_with(';') {
            declaration = Some(line);
        } else if line.ends_with('{') && !line.starts_with("Compiled from") {
            saw_class = true;
        }
    }

    if !saw_class {
        return Err(format!("javap printed no declaration for {}", class));
    }
    Ok((has_default_constructor, members))
}

/// The identifier directly before the parameter list, e.g. `square` in
/// `public static <T> java.util.List<T> square(int);`.
fn method_name(declaration: &str) -> Option<&str> {
    let before_params = &declaration[..declaration.find('(')?];
    before_params
        .split_whitespace()
        .last()
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::java_type::{JavaType, Primitive, STRING};

    const LISTING: &str = r#"Compiled from "UserCode.java"
public class UserCode {
  public int counter;
    descriptor: I
  public UserCode();
    descriptor: ()V

  public int square(int);
    descriptor: (I)I

  public java.lang.String greet(java.lang.String);
    descriptor: (Ljava/lang/String;)Ljava/lang/String;

  public static <T> java.util.List<T> wrap(T[]) throws java.io.IOException;
    descriptor: ([Ljava/lang/Object;)Ljava/util/List;

  public void reset();
    descriptor: ()V
}
"#;

    #[test]
    fn test_parse_members_in_declaration_order() {
        let (has_default, members) = parse_members("UserCode", LISTING).unwrap();
        assert!(has_default);
        let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["square", "greet", "wrap", "reset"]);

        assert_eq!(
            members[0].parameter_types,
            vec![JavaType::Primitive(Primitive::Int)]
        );
        assert_eq!(members[1].return_type, JavaType::class(STRING));
        assert!(members[2].is_static);
        assert!(!members[0].is_static);
        assert!(members[3].return_type.is_void());
        assert_eq!(members[2].to_string(), "wrap(Object[])");
    }

    #[test]
    fn test_constructor_with_arguments_is_not_default() {
        let listing = "public class UserCode {\n  public UserCode(int);\n    descriptor: (I)V\n}\n";
        let (has_default, members) = parse_members("UserCode", listing).unwrap();
        assert!(!has_default);
        assert!(members.is_empty());
    }

    #[test]
    fn test_empty_listing_is_rejected() {
        assert!(parse_members("UserCode", "").is_err());
    }

    #[test]
    fn test_bad_descriptor_is_rejected() {
        let listing = "public class UserCode {\n  public void f(int);\n    descriptor: (Q)V\n}\n";
        assert!(parse_members("UserCode", listing).is_err());
    }

    #[test]
    fn test_method_name() {
        assert_eq!(method_name("public int square(int);"), Some("square"));
        assert_eq!(
            method_name("public static <T> java.util.List<T> wrap(T[]);"),
            Some("wrap")
        );
        assert_eq!(method_name("public int counter;"), None);
    }
}
