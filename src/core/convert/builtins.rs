//! Built-in PHP class, interface and trait names.
//!
//! Once a library moves into a namespace, an unqualified reference such as
//! `new Exception()` resolves against that namespace first. Every name here
//! gets rewritten to its global `\Name` form. The table covers the core
//! runtime and the extensions commonly compiled in; extend it through the
//! `extra_builtins` config key.

/// PHP release line the table was taken from.
pub const BUILTINS_VERSION: &str = "8.3";

pub const PHP_BUILTINS: &[&str] = &[
    // Core
    "stdClass",
    "Traversable",
    "IteratorAggregate",
    "Iterator",
    "ArrayAccess",
    "Countable",
    "Serializable",
    "Stringable",
    "Throwable",
    "UnitEnum",
    "BackedEnum",
    "Closure",
    "Generator",
    "ClosedGeneratorException",
    "WeakReference",
    "WeakMap",
    "Fiber",
    "FiberError",
    "Attribute",
    "ReturnTypeWillChange",
    "AllowDynamicProperties",
    "SensitiveParameter",
    "SensitiveParameterValue",
    "Override",
    "InternalIterator",
    "Directory",
    "__PHP_Incomplete_Class",
    "php_user_filter",
    "AssertionError",
    "Exception",
    "ErrorException",
    "Error",
    "CompileError",
    "ParseError",
    "TypeError",
    "ArgumentCountError",
    "ValueError",
    "ArithmeticError",
    "DivisionByZeroError",
    "UnhandledMatchError",
    // JSON
    "JsonSerializable",
    "JsonException",
    // Date
    "DateTimeInterface",
    "DateTime",
    "DateTimeImmutable",
    "DateTimeZone",
    "DateInterval",
    "DatePeriod",
    // SPL exceptions
    "LogicException",
    "BadFunctionCallException",
    "BadMethodCallException",
    "DomainException",
    "InvalidArgumentException",
    "LengthException",
    "OutOfRangeException",
    "RuntimeException",
    "OutOfBoundsException",
    "OverflowException",
    "RangeException",
    "UnderflowException",
    "UnexpectedValueException",
    // SPL iterators and data structures
    "RecursiveIterator",
    "OuterIterator",
    "SeekableIterator",
    "SplObserver",
    "SplSubject",
    "RecursiveIteratorIterator",
    "IteratorIterator",
    "FilterIterator",
    "RecursiveFilterIterator",
    "CallbackFilterIterator",
    "RecursiveCallbackFilterIterator",
    "ParentIterator",
    "LimitIterator",
    "CachingIterator",
    "RecursiveCachingIterator",
    "NoRewindIterator",
    "AppendIterator",
    "InfiniteIterator",
    "RegexIterator",
    "RecursiveRegexIterator",
    "EmptyIterator",
    "RecursiveTreeIterator",
    "ArrayObject",
    "ArrayIterator",
    "RecursiveArrayIterator",
    "SplFileInfo",
    "DirectoryIterator",
    "FilesystemIterator",
    "RecursiveDirectoryIterator",
    "GlobIterator",
    "SplFileObject",
    "SplTempFileObject",
    "SplDoublyLinkedList",
    "SplQueue",
    "SplStack",
    "SplHeap",
    "SplMinHeap",
    "SplMaxHeap",
    "SplPriorityQueue",
    "SplFixedArray",
    "SplObjectStorage",
    "MultipleIterator",
    // Reflection
    "ReflectionException",
    "Reflection",
    "Reflector",
    "ReflectionFunctionAbstract",
    "ReflectionFunction",
    "ReflectionGenerator",
    "ReflectionParameter",
    "ReflectionType",
    "ReflectionNamedType",
    "ReflectionUnionType",
    "ReflectionIntersectionType",
    "ReflectionMethod",
    "ReflectionClass",
    "ReflectionObject",
    "ReflectionProperty",
    "ReflectionClassConstant",
    "ReflectionExtension",
    "ReflectionZendExtension",
    "ReflectionReference",
    "ReflectionAttribute",
    "ReflectionEnum",
    "ReflectionEnumUnitCase",
    "ReflectionEnumBackedCase",
    "ReflectionFiber",
    // Session
    "SessionHandlerInterface",
    "SessionIdInterface",
    "SessionUpdateTimestampHandlerInterface",
    "SessionHandler",
    // PDO
    "PDO",
    "PDOException",
    "PDOStatement",
    "PDORow",
    // mysqli
    "mysqli",
    "mysqli_driver",
    "mysqli_result",
    "mysqli_stmt",
    "mysqli_warning",
    "mysqli_sql_exception",
    // SQLite3
    "SQLite3",
    "SQLite3Stmt",
    "SQLite3Result",
    // DOM and XML
    "DOMException",
    "DOMImplementation",
    "DOMNode",
    "DOMNameSpaceNode",
    "DOMDocumentFragment",
    "DOMDocument",
    "DOMNodeList",
    "DOMNamedNodeMap",
    "DOMCharacterData",
    "DOMAttr",
    "DOMElement",
    "DOMText",
    "DOMComment",
    "DOMCdataSection",
    "DOMDocumentType",
    "DOMNotation",
    "DOMEntity",
    "DOMEntityReference",
    "DOMProcessingInstruction",
    "DOMXPath",
    "LibXMLError",
    "SimpleXMLElement",
    "SimpleXMLIterator",
    "XMLReader",
    "XMLWriter",
    "XSLTProcessor",
    // Misc extensions
    "CURLFile",
    "CURLStringFile",
    "CurlHandle",
    "CurlMultiHandle",
    "CurlShareHandle",
    "finfo",
    "ZipArchive",
    "Collator",
    "NumberFormatter",
    "Normalizer",
    "Locale",
    "MessageFormatter",
    "IntlDateFormatter",
    "ResourceBundle",
    "Transliterator",
    "IntlException",
    "HashContext",
];

/// Static table plus any configured additions, in that order.
pub fn builtin_names(extra: &[String]) -> Vec<&str> {
    PHP_BUILTINS
        .iter()
        .copied()
        .chain(extra.iter().map(String::as_str))
        .collect()
}
