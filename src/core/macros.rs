//! 核心宏定义
//!
//! 配置结构体和资源类型的默认值都通过这些宏声明，避免手写重复的 `impl Default`。

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use party_swarm::impl_default;
///
/// struct SprayConfig {
///     gain: f32,
///     file: String,
/// }
///
/// impl_default!(SprayConfig {
///     gain: 2.0,
///     file: "spray.flac".to_string(),
/// });
///
/// assert_eq!(SprayConfig::default().gain, 2.0);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}
