//! Static keyword lists backing [`KeywordTable`](crate::KeywordTable).

/// C and C++ language keywords (shared with GLSL, which is C-like).
pub(crate) const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "int", "long", "register", "return", "short",
    "signed", "sizeof", "static", "struct", "switch", "typedef", "union", "unsigned", "void",
    "volatile", "while", "class", "public", "private", "protected", "new", "delete", "this",
    "friend", "virtual", "inline", "try", "catch", "throw", "namespace", "using", "template",
    "typename", "true", "false", "bool", "asm", "explicit", "operator", "nullptr",
];

/// GLSL storage qualifiers, built-in types and precision keywords.
pub(crate) const GLSL_KEYWORDS: &[&str] = &[
    "in", "out", "inout", "uniform", "layout", "centroid", "smooth", "flat", "noperspective",
    "attribute", "varying", "buffer", "shared", "coherent", "restrict", "readonly", "writeonly",
    "atomic_uint", "std140", "std430", "packed", "binding", "location", "vec2", "vec3", "vec4",
    "ivec2", "ivec3", "ivec4", "bvec2", "bvec3", "bvec4", "uvec2", "uvec3", "uvec4", "dvec2",
    "dvec3", "dvec4", "mat2", "mat3", "mat4", "dmat2", "dmat3", "dmat4", "sampler1D",
    "sampler2D", "sampler3D", "samplerCube", "sampler2DRect", "sampler1DShadow",
    "sampler2DShadow", "samplerCubeShadow", "sampler1DArray", "sampler2DArray", "samplerBuffer",
    "sampler2DMS", "sampler2DMSArray", "isampler1D", "isampler2D", "isampler3D", "isamplerCube",
    "usampler1D", "usampler2D", "usampler3D", "usamplerCube", "image1D", "image2D", "image3D",
    "imageCube", "imageBuffer", "image1DArray", "image2DArray", "discard", "precision", "highp",
    "mediump", "lowp",
];

/// CMake commands. Stored lowercase; CMake command lookup is case-folded.
pub(crate) const CMAKE_KEYWORDS: &[&str] = &[
    "add_compile_definitions", "add_compile_options", "add_custom_command", "add_custom_target",
    "add_dependencies", "add_executable", "add_library", "add_link_options", "add_subdirectory",
    "add_test", "aux_source_directory", "break", "build_command", "cmake_minimum_required",
    "cmake_policy", "configure_file", "define_property", "else", "elseif", "enable_language",
    "enable_testing", "endforeach", "endfunction", "endif", "endmacro", "endwhile",
    "execute_process", "export", "file", "find_file", "find_library", "find_package",
    "find_path", "find_program", "foreach", "function", "get_cmake_property",
    "get_directory_property", "get_filename_component", "get_property", "get_target_property",
    "if", "include", "include_directories", "install", "link_directories", "link_libraries",
    "list", "macro", "mark_as_advanced", "math", "message", "option", "project",
    "remove_definitions", "return", "separate_arguments", "set", "set_property",
    "set_source_files_properties", "set_target_properties", "site_name", "source_group",
    "string", "target_compile_definitions", "target_compile_features",
    "target_compile_options", "target_include_directories", "target_link_libraries",
    "target_link_options", "try_compile", "try_run", "unset", "variable_watch", "while",
];

/// x86/x86-64 instruction mnemonics.
pub(crate) const ASM_INSTRUCTIONS: &[&str] = &[
    "mov", "lea", "add", "sub", "mul", "imul", "div", "idiv", "inc", "dec", "and", "or", "xor",
    "not", "shl", "shr", "sal", "sar", "rol", "ror", "jmp", "je", "jne", "jz", "jnz", "jg",
    "jge", "jl", "jle", "ja", "jae", "jb", "jbe", "jc", "jnc", "call", "ret", "push", "pop",
    "cmp", "test", "syscall",
];

/// AT&T-syntax register names, stored without the `%` sigil.
pub(crate) const ASM_REGISTERS: &[&str] = &[
    "rax", "eax", "ax", "al", "ah", "rbx", "ebx", "bx", "bl", "bh", "rcx", "ecx", "cx", "cl",
    "ch", "rdx", "edx", "dx", "dl", "dh", "rsi", "esi", "si", "sil", "rdi", "edi", "di", "dil",
    "rbp", "ebp", "bp", "bpl", "rsp", "esp", "sp", "spl", "r8", "r8d", "r8w", "r8b", "r9",
    "r9d", "r9w", "r9b", "r10", "r10d", "r10w", "r10b", "r11", "r11d", "r11w", "r11b", "r12",
    "r12d", "r12w", "r12b", "r13", "r13d", "r13w", "r13b", "r14", "r14d", "r14w", "r14b", "r15",
    "r15d", "r15w", "r15b",
];

/// GNU assembler directives, including the leading dot.
pub(crate) const ASM_DIRECTIVES: &[&str] = &[
    ".align", ".ascii", ".asciz", ".byte", ".data", ".double", ".equ", ".extern", ".file",
    ".float", ".global", ".globl", ".int", ".long", ".quad", ".section", ".short", ".size",
    ".string", ".text", ".type", ".word", ".zero",
];

/// GNU make conditional and inclusion directives.
pub(crate) const MAKE_DIRECTIVES: &[&str] = &[
    "if", "ifeq", "ifneq", "else", "endif", "include", "define", "endef", "override", "export",
    "undefine",
];

/// Conventional make variables (implicit-rule configuration).
pub(crate) const MAKE_VARIABLES: &[&str] = &[
    "CC", "CXX", "CPP", "LD", "AS", "AR", "CFLAGS", "CXXFLAGS", "LDFLAGS", "ASFLAGS", "ARFLAGS",
    "RM", "SHELL",
];

/// Linker-script top-level commands.
pub(crate) const LD_COMMANDS: &[&str] = &[
    "ENTRY", "MEMORY", "SECTIONS", "INCLUDE", "OUTPUT_FORMAT", "OUTPUT_ARCH", "ASSERT",
    "ORIGIN", "LENGTH", "FILL",
];

/// Linker-script builtin functions.
pub(crate) const LD_FUNCTIONS: &[&str] = &[
    "ALIGN", "DEFINED", "LOADADDR", "SIZEOF", "ADDR", "MAX", "MIN",
];
