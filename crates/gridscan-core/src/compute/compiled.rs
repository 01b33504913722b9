use core::fmt::Display;

use gridscan_runtime::id::KernelId;

use crate::Shape;

/// A kernel, compiled in the target language.
pub struct CompiledKernel {
    /// Name of the kernel type.
    pub name: Option<&'static str>,
    /// Name of the function invoked once per output element.
    pub entry_point: &'static str,
    /// Source code of the kernel.
    pub source: String,
    /// Shape of the invocation space.
    pub output_shape: Shape,
    /// Extra debugging information about the compiled kernel.
    pub debug_info: Option<DebugInformation>,
}

/// Extra debugging information about the compiled kernel.
#[derive(new)]
pub struct DebugInformation {
    /// The language tag of the source.
    pub lang_tag: &'static str,
    /// The compilation id.
    pub id: KernelId,
}

impl Display for CompiledKernel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("\n[START_KERNEL_COMPILATION]")?;

        if let Some(name) = self.name {
            f.write_fmt(format_args!("\nname: {}", short_type_name(name)))?;
        }

        f.write_fmt(format_args!(
            "\nentry_point: {}\noutput_shape: {}",
            self.entry_point, self.output_shape
        ))?;

        if let Some(info) = &self.debug_info {
            f.write_fmt(format_args!("\ninfo: {}", info.id))?;
        }

        f.write_fmt(format_args!(
            "
source:
```{}
{}
```
[END_KERNEL_COMPILATION]
",
            self.debug_info
                .as_ref()
                .map(|info| info.lang_tag)
                .unwrap_or(""),
            self.source
        ))
    }
}

// Strips module paths, keeping generics readable.
fn short_type_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut segment = String::new();

    for c in name.chars() {
        match c {
            '<' | '>' | ',' | ' ' => {
                result.push_str(segment.rsplit("::").next().unwrap_or(&segment));
                segment.clear();
                result.push(c);
            }
            _ => segment.push(c),
        }
    }
    result.push_str(segment.rsplit("::").next().unwrap_or(&segment));

    result
}
