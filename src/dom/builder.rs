// ============================================================================
// ELEMENT BUILDER - Builder pattern para crear elementos fácilmente
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::dom::{append_child, create_element, create_svg_element, on_click, set_attribute};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    /// Crear nuevo builder para un elemento
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Builder para un elemento SVG (`svg`, `circle`, `polyline`...)
    pub fn svg(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_svg_element(tag)?,
        })
    }

    /// Establecer class (vía atributo: funciona también en SVG)
    pub fn class(self, class: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, "class", class)?;
        Ok(self)
    }

    /// Establecer ID
    pub fn id(self, id: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, "id", id)?;
        Ok(self)
    }

    /// Establecer text content
    pub fn text(self, text: &str) -> Self {
        self.element.set_text_content(Some(text));
        self
    }

    /// Establecer atributo
    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, name, value)?;
        Ok(self)
    }

    /// Atributo booleano (`disabled`, `checked`...) solo si `on`
    pub fn flag(self, name: &str, on: bool) -> Result<Self, JsValue> {
        if on {
            set_attribute(&self.element, name, "")?;
        }
        Ok(self)
    }

    /// Agregar hijo
    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn children<I>(self, children: I) -> Result<Self, JsValue>
    where
        I: IntoIterator<Item = Element>,
    {
        for child in children {
            append_child(&self.element, &child)?;
        }
        Ok(self)
    }

    pub fn on_click<F>(self, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(MouseEvent) + 'static,
    {
        on_click(&self.element, handler)?;
        Ok(self)
    }

    /// Construir y retornar elemento
    pub fn build(self) -> Element {
        self.element
    }
}
