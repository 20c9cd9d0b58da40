// Núcleo puro: planilha -> séries dos gráficos
pub mod columns;
pub mod fallback;
pub mod mappers;
pub mod parsers;
pub mod render;
pub mod smoothing;
