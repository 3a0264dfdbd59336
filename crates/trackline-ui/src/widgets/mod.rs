pub mod timeline_canvas;
