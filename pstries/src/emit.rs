//! Renders compiled tries as C++ array declarations

use crate::table::{CompiledTrie, Payload};
use core::fmt::{self, Display};

const DEFAULT_ELEMENT_TYPE: &str = "uint_fast16_t";

#[derive(Clone, Debug)]
pub struct CppEmitter {
    element_type: String,
    namespace: Option<String>,
    guarded_include: Option<(String, String)>,
}

impl CppEmitter {
    pub fn new() -> Self {
        Self {
            element_type: DEFAULT_ELEMENT_TYPE.into(),
            namespace: None,
            guarded_include: None,
        }
    }

    /// Integer type of the array elements, must be able to hold 16-bit values
    pub fn element_type(&mut self, element_type: impl Into<String>) -> &mut Self {
        self.element_type = element_type.into();
        self
    }

    /// Named namespace enclosing the anonymous namespace the declarations live in
    pub fn namespace(&mut self, namespace: impl Into<String>) -> &mut Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Header to include unless `guard` is already defined
    pub fn guarded_include(
        &mut self,
        guard: impl Into<String>,
        header: impl Into<String>,
    ) -> &mut Self {
        self.guarded_include = Some((guard.into(), header.into()));
        self
    }

    /// Declaration of a single trie array
    pub fn declaration<'t>(&'t self, trie: &'t CompiledTrie) -> Declaration<'t> {
        Declaration {
            emitter: self,
            trie,
        }
    }

    /// Complete source file declaring all given tries in order
    pub fn source<'t>(&'t self, tries: &'t [CompiledTrie]) -> Source<'t> {
        Source {
            emitter: self,
            tries,
        }
    }
}

impl Default for CppEmitter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Declaration<'t> {
    emitter: &'t CppEmitter,
    trie: &'t CompiledTrie,
}

impl Display for Declaration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let element_type = &self.emitter.element_type;

        write!(f, "const {} {}[] {{", element_type, self.trie.name())?;

        for (i, entry) in self.trie.entries().iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }

            write!(f, "\n\t{}, {}, {}, ", entry.char_code, entry.left, entry.right)?;

            match &entry.payload {
                Payload::Continuation(address) => write!(f, "{address}")?,
                Payload::Terminal(value) => write!(f, "static_cast<{element_type}>({value})")?,
            }
        }

        f.write_str("\n};")
    }
}

pub struct Source<'t> {
    emitter: &'t CppEmitter,
    tries: &'t [CompiledTrie],
}

impl Display for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("// GENERATED by pstries, do not edit\n\n")?;

        if let Some((guard, header)) = &self.emitter.guarded_include {
            write!(f, "#ifndef {guard}\n#include <{header}>\n#endif\n\n")?;
        }

        f.write_str("#include <cstdint>\n\n//@formatter:off\n")?;

        if let Some(namespace) = &self.emitter.namespace {
            writeln!(f, "namespace {namespace} {{")?;
        }

        f.write_str("namespace {\n")?;

        for trie in self.tries {
            writeln!(f, "\n{}", self.emitter.declaration(trie))?;
        }

        f.write_str("}\n")?;

        if self.emitter.namespace.is_some() {
            f.write_str("}\n")?;
        }

        f.write_str("//@formatter:on\n")
    }
}
