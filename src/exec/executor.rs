/// Pipeline orchestration
///
/// parse + wrap -> compile -> load -> resolve -> invoke. The first failing
/// stage fails the whole request; nothing is retried.
use crate::args;
use crate::compile::javac::JavacCompiler;
use crate::compile::javap::JavapLoader;
use crate::compile::{wrapper, CompilationService, ModuleLoader};
use crate::config::presets::JavaToolchain;
use crate::config::types::{ExecutionRequest, Result};
use crate::invoke::jvm::JvmInvoker;
use crate::invoke::Invoker;
use crate::resolve;
use crate::safety::workspace;
use crate::verdict::{InvocationOutcome, ReturnValue};
use std::path::PathBuf;

pub struct Executor {
    compiler: Box<dyn CompilationService>,
    loader: Box<dyn ModuleLoader>,
    invoker: Box<dyn Invoker>,
    output_dir: PathBuf,
}

impl Executor {
    pub fn new(
        compiler: Box<dyn CompilationService>,
        loader: Box<dyn ModuleLoader>,
        invoker: Box<dyn Invoker>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            compiler,
            loader,
            invoker,
            output_dir: output_dir.into(),
        }
    }

    /// Executor backed by the given JDK tools.
    pub fn java(toolchain: JavaToolchain, output_dir: impl Into<PathBuf>) -> Self {
        Self::new(
            Box::new(JavacCompiler::new(toolchain.clone())),
            Box::new(JavapLoader::new(toolchain.clone())),
            Box::new(JvmInvoker::new(toolchain)),
            output_dir,
        )
    }

    pub fn run(&self, request: &ExecutionRequest) -> Result<ReturnValue> {
        let arguments = args::parse(&request.raw_input);
        log::debug!("Parsed {} argument(s): {:?}", arguments.len(), arguments);
        let unit = wrapper::wrap(&request.source_code);

        let workspace = workspace::prepare_for_compilation(&self.output_dir)?;
        let artifact = self.compiler.compile(&unit, workspace.root())?;
        let module = self.loader.load(&artifact)?;
        let member = resolve::resolve(&module, &request.method_name, &arguments)?;
        self.invoker.invoke(&module, member, &arguments)
    }

    /// Run the request and fold any failure into the outcome.
    pub fn execute(&self, request: &ExecutionRequest) -> InvocationOutcome {
        self.run(request).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ParsedArgument;
    use crate::compile::{CallableMember, CompilationUnit, CompiledArtifact, LoadedModule};
    use crate::config::types::{ErrorKind, ExecError};
    use crate::resolve::java_type::{JavaType, Primitive, STRING};
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    struct FakeCompiler {
        fail_with: Option<String>,
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl CompilationService for FakeCompiler {
        fn compile(&self, unit: &CompilationUnit, out_dir: &Path) -> Result<CompiledArtifact> {
            self.seen.borrow_mut().push(unit.source.clone());
            if let Some(diagnostics) = &self.fail_with {
                return Err(ExecError::Compilation(diagnostics.clone()));
            }
            Ok(CompiledArtifact {
                class_name: unit.class_name.clone(),
                class_dir: out_dir.to_path_buf(),
            })
        }
    }

    struct FakeLoader {
        members: Vec<CallableMember>,
    }

    impl ModuleLoader for FakeLoader {
        fn load(&self, artifact: &CompiledArtifact) -> Result<LoadedModule> {
            Ok(LoadedModule {
                class_name: artifact.class_name.clone(),
                class_dir: artifact.class_dir.clone(),
                has_default_constructor: true,
                members: self.members.clone(),
            })
        }
    }

    /// Squares an int argument, divides by zero for `div`.
    struct FakeInvoker;

    impl Invoker for FakeInvoker {
        fn invoke(
            &self,
            _module: &LoadedModule,
            member: &CallableMember,
            args: &[ParsedArgument],
        ) -> Result<ReturnValue> {
            match (member.name.as_str(), args) {
                ("square", [ParsedArgument::Integer(x)]) => {
                    Ok(ReturnValue::Scalar((x * x).to_string()))
                }
                ("div", _) => Err(ExecError::invocation(
                    "java.lang.ArithmeticException: / by zero",
                    "\tat UserCode.div(UserCode.java:10)",
                )),
                _ => Ok(ReturnValue::Null),
            }
        }
    }

    fn int_member(name: &str) -> CallableMember {
        CallableMember {
            name: name.to_string(),
            parameter_types: vec![JavaType::Primitive(Primitive::Int)],
            return_type: JavaType::Primitive(Primitive::Int),
            is_static: false,
        }
    }

    fn executor(
        dir: &Path,
        fail_with: Option<&str>,
        members: Vec<CallableMember>,
    ) -> (Executor, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let executor = Executor::new(
            Box::new(FakeCompiler {
                fail_with: fail_with.map(str::to_string),
                seen: Rc::clone(&seen),
            }),
            Box::new(FakeLoader { members }),
            Box::new(FakeInvoker),
            dir,
        );
        (executor, seen)
    }

    fn request(method: &str, input: &str) -> ExecutionRequest {
        ExecutionRequest {
            source_code: "public int square(int x){ return x*x; }".to_string(),
            method_name: method.to_string(),
            raw_input: input.to_string(),
        }
    }

    #[test]
    fn test_successful_pipeline() {
        let temp = tempfile::tempdir().unwrap();
        let (executor, seen) = executor(temp.path(), None, vec![int_member("square")]);
        let outcome = executor.execute(&request("square", "4"));
        assert_eq!(
            outcome,
            InvocationOutcome::Success(ReturnValue::Scalar("16".to_string()))
        );
        assert!(seen.borrow()[0].contains("public class UserCode {"));
    }

    #[test]
    fn test_compile_failure_stops_pipeline() {
        let temp = tempfile::tempdir().unwrap();
        let (executor, _) = executor(
            temp.path(),
            Some("UserCode.java:10: error: ';' expected"),
            vec![int_member("square")],
        );
        let outcome = executor.execute(&request("square", "4"));
        match outcome {
            InvocationOutcome::Failure { kind, message } => {
                assert_eq!(kind, ErrorKind::Compilation);
                assert_eq!(message, "Compilation failed: UserCode.java:10: error: ';' expected");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_resolution_failure_lists_members() {
        let temp = tempfile::tempdir().unwrap();
        let greet = CallableMember {
            name: "greet".to_string(),
            parameter_types: vec![JavaType::class(STRING)],
            return_type: JavaType::class(STRING),
            is_static: false,
        };
        let (executor, _) = executor(temp.path(), None, vec![greet]);
        let err = executor.run(&request("shout", "")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert!(err.to_string().contains("greet(String)"));
    }

    #[test]
    fn test_invocation_fault_becomes_failure() {
        let temp = tempfile::tempdir().unwrap();
        let (executor, _) = executor(temp.path(), None, vec![int_member("div")]);
        let outcome = executor.execute(&request("div", "1"));
        assert_eq!(outcome.exit_code(), 1);
        match outcome {
            InvocationOutcome::Failure { kind, message } => {
                assert_eq!(kind, ErrorKind::Invocation);
                assert!(message.starts_with("java.lang.ArithmeticException: / by zero"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_stale_output_is_cleared() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("UserCode.class"), b"stale").unwrap();
        let (executor, _) = executor(temp.path(), None, vec![int_member("square")]);
        executor.run(&request("square", "2")).unwrap();
        assert!(!temp.path().join("UserCode.class").exists());
    }
}
