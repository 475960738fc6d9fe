//! Built-in error-code catalog
//!
//! Field codes are grouped in blocks of ten per field type. Inside a block the
//! common rules share offsets (`required` = +1, `null` = +2, `invalid` or the
//! type's main rule = +3) so a code can be read back without the table.

use crate::codes::ErrorCode;
use indexmap::IndexMap;

/// Code of the envelope wrapping field-level failures
pub const VALIDATION_FAILED_CODE: i64 = 1000;

/// Message of the envelope wrapping field-level failures
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation Failed";

/// Message emitted when the submitted payload is not an object
pub const INVALID_DATA_MESSAGE: &str = "Invalid data. Expected a dictionary, but got {data_type}.";

/// Reserved error-tree key for object-level errors
pub const NON_FIELD_ERRORS_KEY: &str = "non_field_errors";

/// Rule codes per field type name
pub type FieldErrorTable = IndexMap<String, IndexMap<String, ErrorCode>>;

/// Flat name-to-code table
pub type CodeTable = IndexMap<String, ErrorCode>;

const FIELD_ERRORS: &[(&str, &[(&str, i64)])] = &[
	("Field", &[("required", 1991), ("null", 1992)]),
	// boolean
	(
		"BooleanField",
		&[("required", 2001), ("null", 2002), ("invalid", 2003)],
	),
	(
		"NullBooleanField",
		&[("required", 2011), ("null", 2012), ("invalid", 2013)],
	),
	// string
	(
		"CharField",
		&[
			("required", 2021),
			("null", 2022),
			("invalid", 2023),
			("blank", 2024),
			("max_length", 2025),
			("min_length", 2026),
		],
	),
	(
		"EmailField",
		&[
			("required", 2031),
			("null", 2032),
			("invalid", 2033),
			("blank", 2034),
			("max_length", 2035),
			("min_length", 2036),
		],
	),
	(
		"RegexField",
		&[
			("required", 2041),
			("null", 2042),
			("invalid", 2043),
			("blank", 2044),
			("max_length", 2045),
			("min_length", 2046),
		],
	),
	(
		"SlugField",
		&[
			("required", 2051),
			("null", 2052),
			("invalid", 2053),
			("blank", 2054),
			("max_length", 2055),
			("min_length", 2056),
		],
	),
	(
		"URLField",
		&[
			("required", 2061),
			("null", 2062),
			("invalid", 2063),
			("blank", 2064),
			("max_length", 2065),
			("min_length", 2066),
		],
	),
	(
		"UUIDField",
		&[("required", 2071), ("null", 2072), ("invalid", 2073)],
	),
	(
		"FilePathField",
		&[("required", 2081), ("null", 2082), ("invalid_choice", 2083)],
	),
	(
		"IPAddressField",
		&[
			("required", 2091),
			("null", 2092),
			("invalid", 2093),
			("blank", 2094),
			("max_length", 2095),
			("min_length", 2096),
		],
	),
	// numeric
	(
		"IntegerField",
		&[
			("required", 2101),
			("null", 2102),
			("invalid", 2103),
			("max_value", 2104),
			("min_value", 2105),
			("max_string_length", 2106),
		],
	),
	(
		"FloatField",
		&[
			("required", 2111),
			("null", 2112),
			("invalid", 2113),
			("max_value", 2114),
			("min_value", 2115),
			("max_string_length", 2116),
		],
	),
	(
		"DecimalField",
		&[
			("required", 2121),
			("null", 2122),
			("invalid", 2123),
			("max_value", 2124),
			("min_value", 2125),
			("max_string_length", 2126),
			("max_digits", 2127),
			("max_decimal_places", 2128),
			("max_whole_digits", 2129),
		],
	),
	// date and time
	(
		"DateTimeField",
		&[
			("required", 2131),
			("null", 2132),
			("invalid", 2133),
			("date", 2134),
		],
	),
	(
		"DateField",
		&[
			("required", 2141),
			("null", 2142),
			("invalid", 2143),
			("datetime", 2144),
		],
	),
	(
		"TimeField",
		&[("required", 2151), ("null", 2152), ("invalid", 2153)],
	),
	(
		"DurationField",
		&[("required", 2161), ("null", 2162), ("invalid", 2163)],
	),
	// choice
	(
		"ChoiceField",
		&[("required", 2171), ("null", 2172), ("invalid_choice", 2173)],
	),
	(
		"MultipleChoiceField",
		&[
			("required", 2181),
			("null", 2182),
			("invalid_choice", 2183),
			("not_a_list", 2184),
			("empty", 2185),
		],
	),
	// file
	(
		"FileField",
		&[
			("required", 2191),
			("null", 2192),
			("invalid", 2193),
			("no_name", 2194),
			("empty", 2195),
			("max_length", 2196),
		],
	),
	(
		"ImageField",
		&[
			("required", 2201),
			("null", 2202),
			("invalid", 2203),
			("no_name", 2204),
			("empty", 2205),
			("max_length", 2206),
			("invalid_image", 2207),
		],
	),
	// composite
	(
		"ListField",
		&[
			("required", 2211),
			("null", 2212),
			("not_a_list", 2213),
			("empty", 2214),
			("min_length", 2215),
			("max_length", 2216),
		],
	),
	(
		"DictField",
		&[
			("required", 2221),
			("null", 2222),
			("not_a_dict", 2223),
			("empty", 2224),
		],
	),
	(
		"JSONField",
		&[("required", 2231), ("null", 2232), ("invalid", 2233)],
	),
	// relation
	("StringRelatedField", &[("required", 2241), ("null", 2242)]),
	(
		"PrimaryKeyRelatedField",
		&[
			("required", 2251),
			("null", 2252),
			("does_not_exist", 2253),
			("incorrect_type", 2254),
		],
	),
	(
		"HyperlinkedRelatedField",
		&[
			("required", 2261),
			("null", 2262),
			("no_match", 2263),
			("incorrect_match", 2264),
			("does_not_exist", 2265),
			("incorrect_type", 2266),
		],
	),
	(
		"SlugRelatedField",
		&[
			("required", 2271),
			("null", 2272),
			("does_not_exist", 2273),
			("invalid", 2274),
		],
	),
	(
		"HyperlinkedIdentityField",
		&[
			("required", 2281),
			("null", 2282),
			("no_match", 2283),
			("incorrect_match", 2284),
			("does_not_exist", 2285),
			("incorrect_type", 2286),
		],
	),
	(
		"ManyRelatedField",
		&[
			("required", 2291),
			("null", 2292),
			("not_a_list", 2293),
			("empty", 2294),
		],
	),
	// miscellaneous
	("ReadOnlyField", &[("required", 2301), ("null", 2302)]),
	("HiddenField", &[("required", 2311), ("null", 2312)]),
	(
		"ModelField",
		&[("required", 2321), ("null", 2322), ("max_length", 2323)],
	),
	("SerializerMethodField", &[("required", 2331), ("null", 2332)]),
	// nested serializers
	(
		"Serializer",
		&[("required", 2341), ("null", 2342), ("invalid", 2343)],
	),
	(
		"ListSerializer",
		&[
			("required", 2351),
			("null", 2352),
			("not_a_list", 2353),
			("empty", 2354),
		],
	),
];

const NON_FIELD_ERRORS: &[(&str, i64)] = &[("invalid", 3001), ("unique", 3002), ("null", 3003)];

const VALIDATOR_ERRORS: &[(&str, i64)] = &[
	("UniqueValidator", 4001),
	("UniqueTogetherValidator", 4002),
	("EmailValidator", 4003),
	("RegexValidator", 4004),
	("URLValidator", 4005),
	("MaxValueValidator", 4006),
	("MinValueValidator", 4007),
	("MaxLengthValidator", 4008),
	("MinLengthValidator", 4009),
	("DecimalValidator", 4010),
	("ProhibitNullCharactersValidator", 4011),
	("FileExtensionValidator", 4012),
];

const EXCEPTION_CODES: &[(&str, i64)] = &[
	("ValidationError", VALIDATION_FAILED_CODE),
	("APIException", 1001),
	("ParseError", 1002),
	("AuthenticationFailed", 1003),
	("NotAuthenticated", 1004),
	("PermissionDenied", 1005),
	("NotFound", 1006),
	("MethodNotAllowed", 1007),
	("NotAcceptable", 1008),
	("UnsupportedMediaType", 1009),
	("Throttled", 1010),
];

fn code_table(entries: &[(&str, i64)]) -> CodeTable {
	entries
		.iter()
		.map(|(name, code)| (name.to_string(), ErrorCode::Numeric(*code)))
		.collect()
}

/// Built-in field rule codes
pub fn default_field_errors() -> FieldErrorTable {
	FIELD_ERRORS
		.iter()
		.map(|(field_type, rules)| (field_type.to_string(), code_table(rules)))
		.collect()
}

/// Built-in object-level rule codes
pub fn default_non_field_errors() -> CodeTable {
	code_table(NON_FIELD_ERRORS)
}

/// Built-in validator codes, keyed by validator name
pub fn default_validator_errors() -> CodeTable {
	code_table(VALIDATOR_ERRORS)
}

/// Built-in exception codes, keyed by exception name
pub fn default_exception_codes() -> CodeTable {
	code_table(EXCEPTION_CODES)
}
