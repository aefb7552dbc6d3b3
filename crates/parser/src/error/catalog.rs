//! Fixed catalog of diagnostic message templates.
//!
//! Every error reason in the compiler is rendered from one of these
//! templates, keyed by a short code. Keeping the catalog in one place keeps
//! wording consistent across the lexer, parser, typechecker and compiler.

/// Message code for every diagnostic the front end can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCode {
    /// `u_eof` - unexpected end of file
    UnexpectedEof,
    /// `u_tok` - unexpected token
    UnexpectedToken,
    /// `u_tok_s` - unexpected token, with the expected set spelled out
    UnexpectedTokenExpected,
    /// `i_con` - a construct is not legal at this position
    IllegalConstruct,
    /// `i_val` - a literal value is malformed
    InvalidValue,
    /// `uc_con` - a delimited construct was never closed
    UnclosedConstruct,
    /// `w_e_args` - wrong number of arguments (generics, parameters)
    WrongArgumentCount,
    /// `u_typ` - reference to an unknown type
    UnknownType,
    /// `d_def` - duplicate definition of a name
    DuplicateDefinition,
    /// `d_fld` - duplicate field inside one struct literal
    DuplicateField,
    /// `u_sym` - unresolved symbol at compile time
    UnresolvedSymbol,
    /// `e_yld` - yield without a value
    EmptyYield,
    /// `b_dec` - declaration with neither a type nor an initializer
    BareDeclaration,
    /// `n_imp` - construct the compiler does not lower yet
    NotImplemented,
}

impl MessageCode {
    /// The short catalog key, stable across releases.
    pub fn key(self) -> &'static str {
        match self {
            MessageCode::UnexpectedEof => "u_eof",
            MessageCode::UnexpectedToken => "u_tok",
            MessageCode::UnexpectedTokenExpected => "u_tok_s",
            MessageCode::IllegalConstruct => "i_con",
            MessageCode::InvalidValue => "i_val",
            MessageCode::UnclosedConstruct => "uc_con",
            MessageCode::WrongArgumentCount => "w_e_args",
            MessageCode::UnknownType => "u_typ",
            MessageCode::DuplicateDefinition => "d_def",
            MessageCode::DuplicateField => "d_fld",
            MessageCode::UnresolvedSymbol => "u_sym",
            MessageCode::EmptyYield => "e_yld",
            MessageCode::BareDeclaration => "b_dec",
            MessageCode::NotImplemented => "n_imp",
        }
    }

    /// The message template; `{}` slots are filled in order by [`render`].
    pub fn template(self) -> &'static str {
        match self {
            MessageCode::UnexpectedEof => "unexpected end of file",
            MessageCode::UnexpectedToken => "unexpected token '{}'",
            MessageCode::UnexpectedTokenExpected => "unexpected token '{}', expected {}",
            MessageCode::IllegalConstruct => "'{}' is not allowed {}",
            MessageCode::InvalidValue => "malformed {} literal",
            MessageCode::UnclosedConstruct => "unterminated {}",
            MessageCode::WrongArgumentCount => "'{}' expects {} argument(s), got {}",
            MessageCode::UnknownType => "unknown type '{}'",
            MessageCode::DuplicateDefinition => "'{}' is already defined",
            MessageCode::DuplicateField => "duplicate field '{}'",
            MessageCode::UnresolvedSymbol => "unresolved symbol '{}'",
            MessageCode::EmptyYield => "yield requires a value",
            MessageCode::BareDeclaration => "declaration of '{}' needs a type or a value",
            MessageCode::NotImplemented => "{} not yet implemented",
        }
    }
}

/// Fill a template's `{}` slots with `args`, in order.
///
/// Extra slots are left empty; extra arguments are ignored. Templates are
/// trusted (they come from the catalog above), so no escaping is done.
pub fn render(code: MessageCode, args: &[&str]) -> String {
    let template = code.template();
    let mut out = String::with_capacity(template.len() + 16);
    let mut args = args.iter();
    let mut rest = template;
    while let Some(idx) = rest.find("{}") {
        out.push_str(&rest[..idx]);
        if let Some(arg) = args.next() {
            out.push_str(arg);
        }
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_fills_slots_in_order() {
        let reason = render(MessageCode::WrongArgumentCount, &["List", "1", "2"]);
        assert_eq!(reason, "'List' expects 1 argument(s), got 2");
    }

    #[test]
    fn render_without_args_keeps_template_text() {
        assert_eq!(
            render(MessageCode::UnexpectedEof, &[]),
            "unexpected end of file"
        );
    }
}
