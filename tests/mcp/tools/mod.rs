mod locales;
mod project;
mod scan;
