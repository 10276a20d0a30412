/// Call stub generation
///
/// The stub is a tiny Java class compiled next to `UserCode`. It constructs the
/// target once, performs one call with the parsed arguments as literals, and
/// writes a JSON report to the path given as its first argument:
///
/// - `{"kind":"null"}`
/// - `{"kind":"array","items":[...]}` for arrays and `Iterable`s
/// - `{"kind":"scalar","text":"..."}` for anything else
/// - `{"kind":"fault","message":"...","trace":"..."}` when anything is thrown
///
/// Each argument is cast to the exact parameter type of the resolved member so
/// javac binds the call to that overload and no other.
use crate::args::ParsedArgument;
use crate::compile::{CallableMember, LoadedModule};
use crate::config::types::INVOKER_CLASS_NAME;
use crate::resolve::java_type::JavaType;

const TEMPLATE: &str = r#"import java.io.PrintWriter;
import java.io.StringWriter;
import java.lang.reflect.Array;
import java.math.BigDecimal;
import java.math.BigInteger;
import java.nio.charset.StandardCharsets;
import java.nio.file.Files;
import java.nio.file.Paths;

public class @INVOKER@ {
    public static void main(String[] args) throws Exception {
        String report;
        try {
            @TARGET@ target = new @TARGET@();
            Object value = null;
            @CALL@
            report = describe(value);
        } catch (Throwable t) {
            StringWriter trace = new StringWriter();
            t.printStackTrace(new PrintWriter(trace));
            String frames = trace.toString();
            int firstLine = frames.indexOf('\n');
            frames = firstLine >= 0 ? frames.substring(firstLine + 1) : "";
            report = "{\"kind\":\"fault\",\"message\":" + quote(String.valueOf(t))
                + ",\"trace\":" + quote(frames) + "}";
        }
        Files.write(Paths.get(args[0]), report.getBytes(StandardCharsets.UTF_8));
        System.exit(0);
    }

    private static String describe(Object value) {
        if (value == null) {
            return "{\"kind\":\"null\"}";
        }
        if (value.getClass().isArray() || value instanceof Iterable) {
            return "{\"kind\":\"array\",\"items\":" + render(value) + "}";
        }
        return "{\"kind\":\"scalar\",\"text\":" + quote(String.valueOf(value)) + "}";
    }

    private static String render(Object value) {
        if (value == null) {
            return "null";
        }
        if (value.getClass().isArray()) {
            StringBuilder out = new StringBuilder("[");
            int length = Array.getLength(value);
            for (int i = 0; i < length; i++) {
                if (i > 0) {
                    out.append(',');
                }
                out.append(render(Array.get(value, i)));
            }
            return out.append(']').toString();
        }
        if (value instanceof Iterable) {
            StringBuilder out = new StringBuilder("[");
            boolean first = true;
            for (Object item : (Iterable<?>) value) {
                if (!first) {
                    out.append(',');
                }
                first = false;
                out.append(render(item));
            }
            return out.append(']').toString();
        }
        if (value instanceof Boolean) {
            return value.toString();
        }
        if (value instanceof Integer || value instanceof Long || value instanceof Short
                || value instanceof Byte || value instanceof BigInteger || value instanceof BigDecimal) {
            return value.toString();
        }
        if (value instanceof Double || value instanceof Float) {
            double d = ((Number) value).doubleValue();
            if (!Double.isNaN(d) && !Double.isInfinite(d)) {
                return value.toString();
            }
        }
        return quote(String.valueOf(value));
    }

    private static String quote(String s) {
        StringBuilder out = new StringBuilder("\"");
        for (int i = 0; i < s.length(); i++) {
            char c = s.charAt(i);
            switch (c) {
                case '"': out.append("\\\""); break;
                case '\\': out.append("\\\\"); break;
                case '\n': out.append("\\n"); break;
                case '\r': out.append("\\r"); break;
                case '\t': out.append("\\t"); break;
                default:
                    if (c < 0x20) {
                        out.append(String.format("\\u%04x", (int) c));
                    } else {
                        out.append(c);
                    }
            }
        }
        return out.append('"').toString();
    }
}
"#;

/// Java source of the call stub for `member`.
pub fn call_stub(module: &LoadedModule, member: &CallableMember, args: &[ParsedArgument]) -> String {
    TEMPLATE
        .replace("@INVOKER@", INVOKER_CLASS_NAME)
        .replace("@TARGET@", &module.class_name)
        .replace("@CALL@", &call_statement(module, member, args))
}

/// The single statement performing the call, e.g.
/// `value = target.square((int) (4));`.
pub fn call_statement(module: &LoadedModule, member: &CallableMember, args: &[ParsedArgument]) -> String {
    let receiver = if member.is_static {
        module.class_name.as_str()
    } else {
        "target"
    };
    let arguments = member
        .parameter_types
        .iter()
        .zip(args)
        .map(|(param, arg)| cast_literal(param, arg))
        .collect::<Vec<_>>()
        .join(", ");
    let call = format!("{}.{}({})", receiver, member.name, arguments);
    if member.return_type.is_void() {
        format!("{};", call)
    } else {
        format!("value = {};", call)
    }
}

fn cast_literal(param: &JavaType, arg: &ParsedArgument) -> String {
    format!("({}) ({})", param.source_name(), literal(arg))
}

/// Java expression evaluating to `arg`.
pub fn literal(arg: &ParsedArgument) -> String {
    match arg {
        ParsedArgument::Integer(v) => integer_literal(*v, i32::try_from(*v).is_err()),
        ParsedArgument::Float(v) => double_literal(*v),
        ParsedArgument::Str(s) => string_literal(s),
        ParsedArgument::IntegerArray(values) => {
            let long = values.iter().any(|v| i32::try_from(*v).is_err());
            let elements = values
                .iter()
                .map(|v| integer_literal(*v, long))
                .collect::<Vec<_>>()
                .join(", ");
            format!("new {}[]{{{}}}", if long { "long" } else { "int" }, elements)
        }
        ParsedArgument::StringArray(values) => {
            let elements = values
                .iter()
                .map(|v| string_literal(v))
                .collect::<Vec<_>>()
                .join(", ");
            format!("new String[]{{{}}}", elements)
        }
    }
}

fn integer_literal(value: i64, long: bool) -> String {
    if long {
        format!("{}L", value)
    } else {
        value.to_string()
    }
}

fn double_literal(value: f64) -> String {
    if value.is_nan() {
        "Double.NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Double.POSITIVE_INFINITY".to_string()
        } else {
            "Double.NEGATIVE_INFINITY".to_string()
        }
    } else {
        // Debug always keeps a fraction or exponent: 3.0, 1e20
        format!("{:?}", value)
    }
}

/// Quoted Java string literal. Control characters use 3-digit octal escapes,
/// never `\u`, which javac would translate before lexing.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\{:03o}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
