/// Snippet wrapper
///
/// The caller's snippet becomes the body of `public class UserCode`, preceded
/// by a fixed set of wildcard imports so ad-hoc code compiles without managing
/// imports itself.
use super::CompilationUnit;
use crate::config::types::USER_CLASS_NAME;

const IMPORTS: &[&str] = &[
    "java.util.*",
    "java.util.function.*",
    "java.util.stream.*",
    "java.util.concurrent.*",
    "java.util.concurrent.atomic.*",
    "java.util.regex.*",
    "java.math.*",
    "java.io.*",
];

pub fn wrap(source: &str) -> CompilationUnit {
    let mut unit = String::new();
    for import in IMPORTS {
        unit.push_str("import ");
        unit.push_str(import);
        unit.push_str(";\n");
    }
    unit.push_str("\npublic class ");
    unit.push_str(USER_CLASS_NAME);
    unit.push_str(" {\n");
    unit.push_str(source);
    unit.push_str("\n}\n");

    CompilationUnit {
        class_name: USER_CLASS_NAME.to_string(),
        source: unit,
    }
}
