/// Java type model used for member signatures and argument matching
///
/// Types come from JVM method descriptors (`(I[Ljava/lang/String;)V`) as
/// printed by `javap -s`, so generic parameters are already erased.
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Primitive {
    fn from_descriptor(code: char) -> Option<Self> {
        Some(match code {
            'Z' => Primitive::Boolean,
            'B' => Primitive::Byte,
            'C' => Primitive::Char,
            'S' => Primitive::Short,
            'I' => Primitive::Int,
            'J' => Primitive::Long,
            'F' => Primitive::Float,
            'D' => Primitive::Double,
            'V' => Primitive::Void,
            _ => return None,
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Void => "void",
        }
    }
}

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const INTEGER: &str = "java.lang.Integer";
pub const LONG: &str = "java.lang.Long";
pub const DOUBLE: &str = "java.lang.Double";
pub const BOOLEAN: &str = "java.lang.Boolean";

/// Supertypes of the boxed numbers produced by the argument parser
const NUMBER_SUPERTYPES: &[&str] = &[
    "java.lang.Number",
    OBJECT,
    "java.io.Serializable",
    "java.lang.Comparable",
    "java.lang.constant.Constable",
    "java.lang.constant.ConstantDesc",
];

const STRING_SUPERTYPES: &[&str] = &[
    OBJECT,
    "java.io.Serializable",
    "java.lang.Comparable",
    "java.lang.CharSequence",
    "java.lang.constant.Constable",
    "java.lang.constant.ConstantDesc",
];

const BOOLEAN_SUPERTYPES: &[&str] = &[
    OBJECT,
    "java.io.Serializable",
    "java.lang.Comparable",
    "java.lang.constant.Constable",
];

const ARRAY_SUPERTYPES: &[&str] = &[OBJECT, "java.lang.Cloneable", "java.io.Serializable"];

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum JavaType {
    Primitive(Primitive),
    /// Dotted binary name, e.g. `java.util.Map$Entry`
    Class(String),
    Array(Box<JavaType>),
}

impl JavaType {
    pub fn class(name: &str) -> Self {
        JavaType::Class(name.to_string())
    }

    pub fn array_of(element: JavaType) -> Self {
        JavaType::Array(Box::new(element))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JavaType::Primitive(Primitive::Void))
    }

    /// Name usable in Java source, e.g. in a cast.
    pub fn source_name(&self) -> String {
        match self {
            JavaType::Primitive(p) => p.keyword().to_string(),
            JavaType::Class(name) => name.replace('$', "."),
            JavaType::Array(element) => format!("{}[]", element.source_name()),
        }
    }

    /// Whether a value of runtime type `source` can be assigned to `self`.
    pub fn is_assignable_from(&self, source: &JavaType) -> bool {
        match (self, source) {
            (JavaType::Primitive(target), JavaType::Primitive(from)) => target == from,
            (JavaType::Class(target), JavaType::Class(from)) => {
                target == from || known_supertypes(from).contains(&target.as_str())
            }
            (JavaType::Class(target), JavaType::Array(_)) => {
                ARRAY_SUPERTYPES.contains(&target.as_str())
            }
            (JavaType::Array(target), JavaType::Array(from)) => target.is_assignable_from(from),
            _ => false,
        }
    }

    /// Parse a single field descriptor such as `I`, `[J` or `Ljava/lang/String;`.
    pub fn from_descriptor(descriptor: &str) -> Result<Self, String> {
        let mut chars = descriptor.chars().peekable();
        let parsed = parse_field(&mut chars, descriptor)?;
        if chars.next().is_some() {
            return Err(format!("trailing characters in descriptor '{}'", descriptor));
        }
        Ok(parsed)
    }
}

fn known_supertypes(class: &str) -> &'static [&'static str] {
    match class {
        INTEGER | LONG | DOUBLE | "java.lang.Short" | "java.lang.Byte" | "java.lang.Float" => {
            NUMBER_SUPERTYPES
        }
        STRING => STRING_SUPERTYPES,
        BOOLEAN => BOOLEAN_SUPERTYPES,
        _ => &[OBJECT],
    }
}

impl fmt::Display for JavaType {
    /// Simple names, as shown in resolution diagnostics (`String[]`, `Entry`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Primitive(p) => write!(f, "{}", p.keyword()),
            JavaType::Class(name) => {
                let simple = name.rsplit(['.', '$']).next().unwrap_or(name);
                write!(f, "{}", simple)
            }
            JavaType::Array(element) => write!(f, "{}[]", element),
        }
    }
}

/// Parameter and return types of one method
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub parameters: Vec<JavaType>,
    pub return_type: JavaType,
}

impl MethodDescriptor {
    pub fn parse(descriptor: &str) -> Result<Self, String> {
        let mut chars = descriptor.chars().peekable();
        if chars.next() != Some('(') {
            return Err(format!("method descriptor '{}' must start with '('", descriptor));
        }
        let mut parameters = Vec::new();
        loop {
            match chars.peek() {
                Some(')') => {
                    chars.next();
                    break;
                }
                Some(_) => parameters.push(parse_field(&mut chars, descriptor)?),
                None => return Err(format!("unterminated method descriptor '{}'", descriptor)),
            }
        }
        let return_type = parse_field(&mut chars, descriptor)?;
        if chars.next().is_some() {
            return Err(format!("trailing characters in descriptor '{}'", descriptor));
        }
        Ok(Self {
            parameters,
            return_type,
        })
    }
}

fn parse_field<I>(chars: &mut std::iter::Peekable<I>, descriptor: &str) -> Result<JavaType, String>
where
    I: Iterator<Item = char>,
{
    match chars.next() {
        Some('[') => Ok(JavaType::array_of(parse_field(chars, descriptor)?)),
        Some('L') => {
            let mut name = String::new();
            for c in chars.by_ref() {
                if c == ';' {
                    return Ok(JavaType::Class(name.replace('/', ".")));
                }
                name.push(c);
            }
            Err(format!("unterminated class name in descriptor '{}'", descriptor))
        }
        Some(code) => Primitive::from_descriptor(code)
            .map(JavaType::Primitive)
            .ok_or_else(|| format!("unknown type code '{}' in descriptor '{}'", code, descriptor)),
        None => Err(format!("truncated descriptor '{}'", descriptor)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method_descriptor() {
        let parsed = MethodDescriptor::parse("(I[Ljava/lang/String;[[J)V").unwrap();
        assert_eq!(
            parsed.parameters,
            vec![
                JavaType::Primitive(Primitive::Int),
                JavaType::array_of(JavaType::class(STRING)),
                JavaType::array_of(JavaType::array_of(JavaType::Primitive(Primitive::Long))),
            ]
        );
        assert!(parsed.return_type.is_void());
    }

    #[test]
    fn test_parse_no_arg_descriptor() {
        let parsed = MethodDescriptor::parse("()Ljava/util/List;").unwrap();
        assert!(parsed.parameters.is_empty());
        assert_eq!(parsed.return_type, JavaType::class("java.util.List"));
    }

    #[test]
    fn test_reject_malformed_descriptors() {
        assert!(MethodDescriptor::parse("I)V").is_err());
        assert!(MethodDescriptor::parse("(Ljava/lang/String").is_err());
        assert!(MethodDescriptor::parse("(Q)V").is_err());
        assert!(MethodDescriptor::parse("(I)VV").is_err());
        assert!(JavaType::from_descriptor("[").is_err());
    }

    #[test]
    fn test_display_uses_simple_names() {
        assert_eq!(JavaType::class(STRING).to_string(), "String");
        assert_eq!(JavaType::class("java.util.Map$Entry").to_string(), "Entry");
        assert_eq!(
            JavaType::array_of(JavaType::Primitive(Primitive::Int)).to_string(),
            "int[]"
        );
    }

    #[test]
    fn test_source_name_for_nested_class() {
        assert_eq!(
            JavaType::class("java.util.Map$Entry").source_name(),
            "java.util.Map.Entry"
        );
        assert_eq!(
            JavaType::array_of(JavaType::class(STRING)).source_name(),
            "java.lang.String[]"
        );
    }

    #[test]
    fn test_primitive_assignability_is_identity() {
        let int = JavaType::Primitive(Primitive::Int);
        let long = JavaType::Primitive(Primitive::Long);
        assert!(int.is_assignable_from(&int));
        assert!(!long.is_assignable_from(&int));
        assert!(!int.is_assignable_from(&JavaType::class(INTEGER)));
    }

    #[test]
    fn test_reference_assignability() {
        let integer = JavaType::class(INTEGER);
        assert!(JavaType::class("java.lang.Number").is_assignable_from(&integer));
        assert!(JavaType::class(OBJECT).is_assignable_from(&integer));
        assert!(!JavaType::class(STRING).is_assignable_from(&integer));
        assert!(JavaType::class("java.lang.CharSequence").is_assignable_from(&JavaType::class(STRING)));
        assert!(!JavaType::class("java.lang.Number").is_assignable_from(&JavaType::class(STRING)));
    }

    #[test]
    fn test_array_assignability() {
        let strings = JavaType::array_of(JavaType::class(STRING));
        let ints = JavaType::array_of(JavaType::Primitive(Primitive::Int));
        assert!(JavaType::array_of(JavaType::class(OBJECT)).is_assignable_from(&strings));
        assert!(!JavaType::array_of(JavaType::class(OBJECT)).is_assignable_from(&ints));
        assert!(JavaType::class(OBJECT).is_assignable_from(&ints));
        assert!(JavaType::class("java.lang.Cloneable").is_assignable_from(&ints));
        assert!(!JavaType::class(STRING).is_assignable_from(&ints));
    }
}
