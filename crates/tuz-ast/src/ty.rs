// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type values attached to the syntax tree.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Shared handle to a type. Struct types are compared by handle identity.
pub type TypeRef = Rc<Type>;

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Primitive {
    /// Signed integers
    I8,
    I16,
    I32,
    I64,
    /// Unsigned integers
    U8,
    U16,
    U32,
    U64,
    /// Floating point
    F32,
    F64,
    Bool,
    Void,
}

impl Primitive {
    /// Map a type keyword to its primitive. `int` and `float` are the
    /// 32-bit aliases.
    pub fn from_name(name: &str) -> Option<Primitive> {
        let prim = match name {
            "int" | "i32" => Primitive::I32,
            "float" | "f32" => Primitive::F32,
            "i8" => Primitive::I8,
            "i16" => Primitive::I16,
            "i64" => Primitive::I64,
            "u8" => Primitive::U8,
            "u16" => Primitive::U16,
            "u32" => Primitive::U32,
            "u64" => Primitive::U64,
            "f64" => Primitive::F64,
            "bool" => Primitive::Bool,
            "void" => Primitive::Void,
            _ => return None,
        };
        Some(prim)
    }

    pub fn name(self) -> &'static str {
        match self {
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Bool => "bool",
            Primitive::Void => "void",
        }
    }
}

/// One `(name, type)` entry of a struct's field list.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructField {
    pub name: String,
    pub ty: TypeRef,
}

/// A declared struct. Created with an empty field list; the resolver fills
/// it once every struct name is in scope.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructType {
    pub name: String,
    fields: RefCell<Vec<StructField>>,
}

impl StructType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: RefCell::new(Vec::new()),
        }
    }

    pub fn fields(&self) -> Ref<'_, Vec<StructField>> {
        self.fields.borrow()
    }

    /// Append a field. Duplicate names are kept; lookups see the first one.
    pub fn push_field(&self, name: impl Into<String>, ty: TypeRef) {
        self.fields.borrow_mut().push(StructField {
            name: name.into(),
            ty,
        });
    }

    pub fn field_type(&self, name: &str) -> Option<TypeRef> {
        self.fields
            .borrow()
            .iter()
            .find(|f| f.name == name)
            .map(|f| Rc::clone(&f.ty))
    }
}

/// A type in tuz.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Primitive(Primitive),
    /// Pointer (*T)
    Pointer(TypeRef),
    Struct(StructType),
    /// Function signature
    Function {
        params: Vec<TypeRef>,
        ret: TypeRef,
    },
    /// Type written by name, awaiting resolution
    Named(String),
}

impl Type {
    pub fn primitive(prim: Primitive) -> TypeRef {
        Rc::new(Type::Primitive(prim))
    }

    pub fn int32() -> TypeRef {
        Type::primitive(Primitive::I32)
    }

    pub fn float32() -> TypeRef {
        Type::primitive(Primitive::F32)
    }

    pub fn boolean() -> TypeRef {
        Type::primitive(Primitive::Bool)
    }

    pub fn void() -> TypeRef {
        Type::primitive(Primitive::Void)
    }

    pub fn pointer(pointee: TypeRef) -> TypeRef {
        Rc::new(Type::Pointer(pointee))
    }

    pub fn named(name: impl Into<String>) -> TypeRef {
        Rc::new(Type::Named(name.into()))
    }

    pub fn function(params: Vec<TypeRef>, ret: TypeRef) -> TypeRef {
        Rc::new(Type::Function { params, ret })
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Type::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructType> {
        match self {
            Type::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Type::Named(_))
    }

    /// True when both handles refer to the same declared struct.
    pub fn same_struct(a: &TypeRef, b: &TypeRef) -> bool {
        matches!(**a, Type::Struct(_)) && Rc::ptr_eq(a, b)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(p) => write!(f, "{}", p.name()),
            Type::Pointer(inner) => write!(f, "*{}", inner),
            Type::Struct(s) => write!(f, "struct {}", s.name),
            Type::Function { params, ret } => {
                write!(f, "fn(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, ") -> {}", ret)
            }
            Type::Named(name) => write!(f, "{}", name),
        }
    }
}
