//! Parsing source text into an swc module and printing it back

use swc_core::common::comments::SingleThreadedComments;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceFile, SourceMap, Spanned};
use swc_core::ecma::ast::{EsVersion, Module};
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::{Config, Emitter};
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

use crate::{Span, SyntaxError};

/// Language flavour of a source file, chosen from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `.tsx`
    Tsx,
    /// `.ts`
    TypeScript,
    /// `.jsx` and `.js`
    Jsx,
}

impl Dialect {
    /// Pick the dialect for a file extension (without the dot)
    pub fn from_extension(ext: &str) -> Dialect {
        match ext {
            "tsx" => Dialect::Tsx,
            "ts" | "mts" | "cts" => Dialect::TypeScript,
            _ => Dialect::Jsx,
        }
    }

    pub fn is_typescript(self) -> bool {
        matches!(self, Dialect::Tsx | Dialect::TypeScript)
    }

    fn syntax(self) -> Syntax {
        match self {
            Dialect::Tsx => Syntax::Typescript(TsSyntax {
                tsx: true,
                ..Default::default()
            }),
            Dialect::TypeScript => Syntax::Typescript(TsSyntax::default()),
            Dialect::Jsx => Syntax::Es(EsSyntax {
                jsx: true,
                ..Default::default()
            }),
        }
    }
}

/// A parsed module together with the source map and comments needed to print it
pub struct ParsedModule {
    pub module: Module,
    source_map: Lrc<SourceMap>,
    file: Lrc<SourceFile>,
    comments: SingleThreadedComments,
}

impl std::fmt::Debug for ParsedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedModule")
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

/// Parse `source` as an ES module in the given dialect
///
/// Errors the parser recovered from are still reported as failures: a file
/// that does not parse cleanly is never transformed.
pub fn parse(source: &str, dialect: Dialect) -> Result<ParsedModule, SyntaxError> {
    let source_map: Lrc<SourceMap> = Default::default();
    let file = source_map.new_source_file(
        Lrc::new(FileName::Custom("input".into())),
        source.to_string(),
    );
    let comments = SingleThreadedComments::default();

    let lexer = Lexer::new(
        dialect.syntax(),
        EsVersion::latest(),
        StringInput::from(&*file),
        Some(&comments),
    );
    let mut parser = Parser::new_from(lexer);

    let module = parser
        .parse_module()
        .map_err(|err| parse_error(&err, &file))?;

    if let Some(err) = parser.take_errors().into_iter().next() {
        return Err(parse_error(&err, &file));
    }

    Ok(ParsedModule {
        module,
        source_map,
        file,
        comments,
    })
}

fn parse_error(err: &swc_core::ecma::parser::error::Error, file: &SourceFile) -> SyntaxError {
    SyntaxError::Parse {
        message: err.kind().msg().to_string(),
        span: Span::from_swc(Spanned::span(err), file.start_pos),
    }
}

impl ParsedModule {
    /// Print the (possibly mutated) module back to source text
    pub fn print(&self) -> Result<String, SyntaxError> {
        print_module(&self.module, &self.source_map, Some(&self.comments))
    }

    /// Length of the original source text in bytes
    pub fn source_len(&self) -> usize {
        self.file.src.len()
    }
}

/// Print a module that has no associated comments (e.g. one built in a test)
pub fn print(module: &Module) -> Result<String, SyntaxError> {
    let source_map: Lrc<SourceMap> = Default::default();
    print_module(module, &source_map, None)
}

fn print_module(
    module: &Module,
    source_map: &Lrc<SourceMap>,
    comments: Option<&SingleThreadedComments>,
) -> Result<String, SyntaxError> {
    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(source_map.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: Config::default(),
            comments: comments.map(|c| c as &dyn swc_core::common::comments::Comments),
            cm: source_map.clone(),
            wr: writer,
        };
        emitter.emit_module(module)?;
    }

    Ok(String::from_utf8(buf)?)
}
