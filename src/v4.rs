//!IPv4 module

use core::net;

crate::base::impl_base_methods!(net::Ipv4Addr where REPR=u32, FAMILY=V4);
