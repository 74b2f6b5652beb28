/* Struct to represent a java object type identifer e.g. java.lang.Object */
/* They are stored in the dex native (also JNI) format e.g. Ljava/lang/Object; */

use std::fmt;

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::char;
use nom::combinator::{all_consuming, map, value};
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded, terminated};
use nom::{IResult, Parser};
use serde::Serialize;

/// Represents a Java object identifier
///
/// # Examples
///
/// ```
/// use dexgraph::types::ObjectIdentifier;
///
/// let o = ObjectIdentifier::from_java_type("com.basic.Test");
/// assert_eq!(o.as_java_type(), "com.basic.Test");
/// assert_eq!(o.as_jni_type(), "Lcom/basic/Test;");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectIdentifier {
    pub(crate) class_name: String,
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_jni_type())
    }
}

impl ObjectIdentifier {
    /// Parse a `Lpkg/Name;` descriptor. Anything else yields `None`.
    pub fn from_jni_type(t: &str) -> Option<ObjectIdentifier> {
        match TypeSignature::from_jni(t)? {
            TypeSignature::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn from_java_type(t: &str) -> ObjectIdentifier {
        ObjectIdentifier { class_name: t.replace('.', "/") }
    }

    pub fn as_jni_type(&self) -> String {
        format!("L{};", self.class_name)
    }

    pub fn as_java_type(&self) -> String {
        self.class_name.replace('/', ".")
    }
}

/// Represents a Java type: array, object or primitive type
///
/// # Examples
///
/// ```
///  use dexgraph::types::TypeSignature;
///
///  let t = TypeSignature::Bool;
///  assert_eq!(t.to_jni(), "Z");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TypeSignature {
    Array(Box<TypeSignature>),
    Object(ObjectIdentifier),
    Int,
    Bool,
    Byte,
    Char,
    Short,
    Long,
    Float,
    Double,
    Void,
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_jni())
    }
}

impl TypeSignature {
    /// Parse a complete field type descriptor.
    pub fn from_jni(s: &str) -> Option<TypeSignature> {
        all_consuming(parse_typesignature).parse(s).ok().map(|(_, ts)| ts)
    }

    pub fn to_jni(&self) -> String {
        match self {
            TypeSignature::Array(a) => "[".to_string() + &a.to_jni(),
            TypeSignature::Bool => "Z".to_string(),
            TypeSignature::Byte => "B".to_string(),
            TypeSignature::Char => "C".to_string(),
            TypeSignature::Short => "S".to_string(),
            TypeSignature::Int => "I".to_string(),
            TypeSignature::Long => "J".to_string(),
            TypeSignature::Float => "F".to_string(),
            TypeSignature::Double => "D".to_string(),
            TypeSignature::Object(o) => o.as_jni_type(),
            TypeSignature::Void => "V".to_string(),
        }
    }

    pub fn to_java(&self) -> String {
        match self {
            TypeSignature::Array(a) => format!("{}[]", a.to_java()),
            TypeSignature::Bool => "boolean".to_string(),
            TypeSignature::Byte => "byte".to_string(),
            TypeSignature::Char => "char".to_string(),
            TypeSignature::Short => "short".to_string(),
            TypeSignature::Int => "int".to_string(),
            TypeSignature::Long => "long".to_string(),
            TypeSignature::Float => "float".to_string(),
            TypeSignature::Double => "double".to_string(),
            TypeSignature::Object(o) => o.as_java_type(),
            TypeSignature::Void => "void".to_string(),
        }
    }

    /// The class at the bottom of an object or array type, if there is one.
    pub fn element_class(&self) -> Option<&ObjectIdentifier> {
        match self {
            TypeSignature::Object(o) => Some(o),
            TypeSignature::Array(a) => a.element_class(),
            _ => None,
        }
    }
}

/// Represents a Java method signature consisting of arguments and a return type
///
/// # Examples
///
/// ```
///  use dexgraph::types::{MethodSignature, TypeSignature};
///
///  let m = MethodSignature::from_jni("([I)V").unwrap();
///  assert_eq!(m.result, TypeSignature::Void);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSignature {
    pub args: Vec<TypeSignature>,
    pub result: TypeSignature,
}

impl MethodSignature {
    pub fn from_jni(s: &str) -> Option<MethodSignature> {
        all_consuming(parse_methodsignature).parse(s).ok().map(|(_, m)| m)
    }

    pub fn to_jni(&self) -> String {
        let args: String = self.args.iter().map(TypeSignature::to_jni).collect();
        format!("({}){}", args, self.result.to_jni())
    }

    /// Java style `ret (arg, arg)` rendering.
    pub fn to_java(&self) -> String {
        let args: Vec<String> = self.args.iter().map(TypeSignature::to_java).collect();
        format!("{} ({})", self.result.to_java(), args.join(", "))
    }
}

fn parse_object(input: &str) -> IResult<&str, ObjectIdentifier> {
    map(delimited(tag("L"), take_while1(|x: char| x != ';' && x != '(' && x != ')'), char(';')), |t: &str| {
        ObjectIdentifier { class_name: t.to_string() }
    })
    .parse(input)
}

pub(crate) fn parse_typesignature(input: &str) -> IResult<&str, TypeSignature> {
    alt((
        map(parse_object, TypeSignature::Object),
        map(preceded(char('['), parse_typesignature), |t| TypeSignature::Array(Box::new(t))),
        value(TypeSignature::Bool, char('Z')),
        value(TypeSignature::Byte, char('B')),
        value(TypeSignature::Char, char('C')),
        value(TypeSignature::Short, char('S')),
        value(TypeSignature::Int, char('I')),
        value(TypeSignature::Long, char('J')),
        value(TypeSignature::Float, char('F')),
        value(TypeSignature::Double, char('D')),
        value(TypeSignature::Void, char('V')),
    ))
    .parse(input)
}

pub(crate) fn parse_methodsignature(input: &str) -> IResult<&str, MethodSignature> {
    map(
        pair(terminated(preceded(char('('), many0(parse_typesignature)), char(')')), parse_typesignature),
        |(args, result)| MethodSignature { args, result },
    )
    .parse(input)
}

/// Descriptor of the class behind a type descriptor: the type itself for
/// `Lpkg/Name;`, the element class for arrays of objects, `None` for primitives.
pub fn class_descriptor(descriptor: &str) -> Option<&str> {
    let element = descriptor.trim_start_matches('[');
    if element.len() > 2 && element.starts_with('L') && element.ends_with(';') {
        Some(element)
    } else {
        None
    }
}

/// Normalise a class name given either as `Lpkg/Name;` or as `pkg.Name`.
pub fn canonical_class_name(name: &str) -> String {
    if name.starts_with('L') && name.ends_with(';') {
        name.to_string()
    } else {
        ObjectIdentifier::from_java_type(name).as_jni_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_identifier_java() {
        let o = ObjectIdentifier::from_java_type("com.basic.Test");
        assert_eq!(o.as_java_type(), "com.basic.Test");
        assert_eq!(o.as_jni_type(), "Lcom/basic/Test;");
    }

    #[test]
    fn test_object_identifier_jni() {
        let o = ObjectIdentifier::from_jni_type("Lcom/basic/Test$Inner;").unwrap();
        assert_eq!(o.as_java_type(), "com.basic.Test$Inner");
        assert!(ObjectIdentifier::from_jni_type("[Lcom/basic/Test;").is_none());
        assert!(ObjectIdentifier::from_jni_type("Lbroken").is_none());
    }

    #[test]
    fn test_array_signature() {
        let t = TypeSignature::from_jni("[[Ljava/lang/String;").unwrap();
        assert_eq!(t.to_java(), "java.lang.String[][]");
        assert_eq!(t.element_class().map(|o| o.as_jni_type()).as_deref(), Some("Ljava/lang/String;"));
        assert_eq!(TypeSignature::from_jni("[I").unwrap().element_class(), None);
        assert!(TypeSignature::from_jni("Q").is_none());
        assert!(TypeSignature::from_jni("II").is_none());
    }

    #[test]
    fn test_method_signature() {
        let ts = "(I[JLjava/lang/String;)Ljava/lang/Object;";
        let m = MethodSignature::from_jni(ts).unwrap();
        assert_eq!(m.args.len(), 3);
        assert_eq!(m.to_jni(), ts);
        assert_eq!(m.to_java(), "java.lang.Object (int, long[], java.lang.String)");
        assert!(MethodSignature::from_jni("(I").is_none());
    }

    #[test]
    fn test_class_descriptor() {
        assert_eq!(class_descriptor("Lcom/example/Main;"), Some("Lcom/example/Main;"));
        assert_eq!(class_descriptor("[[Lcom/example/Main;"), Some("Lcom/example/Main;"));
        assert_eq!(class_descriptor("[I"), None);
        assert_eq!(class_descriptor("J"), None);
    }

    #[test]
    fn test_canonical_class_name() {
        assert_eq!(canonical_class_name("com.example.Main"), "Lcom/example/Main;");
        assert_eq!(canonical_class_name("Lcom/example/Main;"), "Lcom/example/Main;");
    }
}
